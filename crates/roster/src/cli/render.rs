//! Text rendering of the roster.

use std::fmt::Write;

use crate::student::Student;

const HEADERS: [&str; 7] = [
    "Name",
    "Program",
    "Email",
    "Phone",
    "Graduation Year",
    "Graduated",
    "Image",
];

fn columns(student: &Student) -> [String; 7] {
    [
        student.full_name.clone(),
        student.program.to_string(),
        student.email.clone(),
        student.phone.clone(),
        student.graduation_year.to_string(),
        if student.graduated { "yes" } else { "no" }.to_string(),
        student.image.clone(),
    ]
}

/// One line per student.
#[must_use]
pub fn render_plain(students: &[Student]) -> String {
    let mut out = String::new();
    for student in students {
        let _ = writeln!(
            out,
            "{} <{}> {} ({}, class of {}){}",
            student.full_name,
            student.email,
            student.phone,
            student.program,
            student.graduation_year,
            if student.graduated { ", graduated" } else { "" }
        );
    }
    out
}

/// Aligned columns under a header row.
#[must_use]
pub fn render_table(students: &[Student]) -> String {
    let rows: Vec<[String; 7]> = students.iter().map(columns).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Program;

    fn students() -> Vec<Student> {
        vec![
            Student {
                id: "1".to_string(),
                full_name: "Ana".to_string(),
                image: "http://a".to_string(),
                phone: "555-1".to_string(),
                email: "ana@x.com".to_string(),
                program: Program::WebDev.into(),
                graduation_year: 2023,
                graduated: true,
            },
            Student {
                id: "2".to_string(),
                full_name: "Bartholomew".to_string(),
                image: "http://b".to_string(),
                phone: "555-2".to_string(),
                email: "bart@x.com".to_string(),
                program: Program::Data.into(),
                graduation_year: 2026,
                graduated: false,
            },
        ]
    }

    #[test]
    fn test_render_plain() {
        let out = render_plain(&students());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Ana <ana@x.com> 555-1 (Web Dev, class of 2023), graduated"
        );
        assert_eq!(lines[1], "Bartholomew <bart@x.com> 555-2 (Data, class of 2026)");
    }

    #[test]
    fn test_render_plain_empty() {
        assert!(render_plain(&[]).is_empty());
    }

    #[test]
    fn test_render_table_keeps_order_and_aligns() {
        let out = render_table(&students());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].starts_with("Ana "));
        assert!(lines[3].starts_with("Bartholomew"));

        let program_col = lines[0].find("Program").unwrap();
        assert_eq!(lines[2].find("Web Dev").unwrap(), program_col);
        assert_eq!(lines[3].find("Data").unwrap(), program_col);
    }

    #[test]
    fn test_render_table_empty_has_header() {
        let out = render_table(&[]);
        assert_eq!(out.lines().count(), 2);
    }
}
