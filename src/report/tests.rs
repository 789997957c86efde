use super::*;
use crate::change::ChangeKind;
use std::path::PathBuf;

fn change(kind: ChangeKind, description: &str) -> Change {
    Change::new(kind, description)
}

#[test]
fn in_sync_message() {
    let out = render(&Comparison::InSync, false);
    assert_eq!(out, "\n👌  Schemas are in sync!\n\n");
}

#[test]
fn rows_are_sorted_by_change_type() {
    let changes = vec![
        change(ChangeKind::FieldRemoved, "Query.b was removed."),
        change(ChangeKind::ValueRemovedFromEnum, "GREEN was removed from enum type Color."),
        change(ChangeKind::ArgRemoved, "Query.users arg first was removed."),
    ];
    let out = change_table(&changes, false).to_string();

    let arg = out.find("ARG_REMOVED").unwrap();
    let field = out.find("FIELD_REMOVED").unwrap();
    let value = out.find("VALUE_REMOVED_FROM_ENUM").unwrap();
    assert!(arg < field);
    assert!(field < value);
}

#[test]
fn equal_change_types_keep_detector_order() {
    let changes = vec![
        change(ChangeKind::FieldRemoved, "Query.z was removed."),
        change(ChangeKind::FieldRemoved, "Query.a was removed."),
    ];
    let out = change_table(&changes, false).to_string();
    assert!(out.find("Query.z").unwrap() < out.find("Query.a").unwrap());
}

#[test]
fn table_has_header_and_double_border() {
    let changes = vec![change(ChangeKind::FieldRemoved, "Query.b was removed.")];
    let out = change_table(&changes, false).to_string();

    assert!(out.contains("Change Type"));
    assert!(out.contains("Change Description"));
    assert!(out.starts_with('╔'));
    assert!(out.trim_end().ends_with('╝'));
}

#[test]
fn long_descriptions_wrap_inside_the_cell() {
    let description = "word ".repeat(60);
    let changes = vec![change(ChangeKind::FieldRemoved, &description)];
    let out = change_table(&changes, false).to_string();

    let width = out.lines().next().unwrap().chars().count();
    assert!(out.lines().all(|line| line.chars().count() == width));
    assert!(out.lines().count() > 5);
}

#[test]
fn table_width_does_not_follow_content() {
    let long = "word ".repeat(60);
    let wide = change_table(
        &[
            change(ChangeKind::FieldRemoved, &long),
            change(ChangeKind::ArgRemoved, "short"),
        ],
        false,
    )
    .to_string();
    let narrow = change_table(&[change(ChangeKind::ArgRemoved, "short")], false).to_string();

    let width = |table: &str| table.lines().next().unwrap().chars().count();
    assert_eq!(width(&wide), width(&narrow));
    assert!(width(&wide) < long.len());
    assert!(wide.lines().all(|line| line.chars().count() == width(&wide)));
}

#[test]
fn banner_layout() {
    let out = banner(Severity::Breaking, 3, false);
    let lines: Vec<&str> = out.split('\n').collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], " ".repeat(16 + 3 + 5 + 1 + 8 - 1));
    assert_eq!(lines[2], "  💣 💣 💣  Breaking Changes (3)   ");
    assert_eq!(lines[3], lines[1]);
    assert_eq!(lines[4], "");
}

#[test]
fn dangerous_banner_counts_digits() {
    let out = banner(Severity::Dangerous, 12, false);
    let lines: Vec<&str> = out.split('\n').collect();

    assert_eq!(lines[1].len(), 17 + 3 + 5 + 2 + 8 - 1);
    assert_eq!(lines[2], "  🔪 🔪 🔪  Dangerous Changes (12)   ");
}

#[test]
fn breaking_section_comes_first() {
    let comparison = Comparison::Changed {
        dangerous: vec![change(ChangeKind::ValueAddedToEnum, "RED was added to enum type Color.")],
        breaking: vec![change(ChangeKind::FieldRemoved, "Query.b was removed.")],
    };
    let out = render(&comparison, false);

    let breaking = out.find("Breaking Changes (1)").unwrap();
    let dangerous = out.find("Dangerous Changes (1)").unwrap();
    assert!(breaking < dangerous);
    assert!(out.find("FIELD_REMOVED").unwrap() < dangerous);
    assert!(out.find("VALUE_ADDED_TO_ENUM").unwrap() > dangerous);
}

#[test]
fn empty_section_is_omitted() {
    let comparison = Comparison::Changed {
        dangerous: vec![change(ChangeKind::OptionalArgAdded, "An optional arg x on Query.a was added.")],
        breaking: vec![],
    };
    let out = render(&comparison, false);

    assert!(!out.contains("Breaking Changes"));
    assert!(out.contains("Dangerous Changes (1)"));
}

#[test]
fn no_escape_codes_without_color() {
    let comparison = Comparison::Changed {
        dangerous: vec![],
        breaking: vec![change(ChangeKind::TypeRemoved, "User was removed.")],
    };
    assert!(!render(&comparison, false).contains('\u{1b}'));
    assert!(!render(&Comparison::InSync, false).contains('\u{1b}'));
}

#[test]
fn comparing_line_names_both_sides() {
    let from = SchemaSource::File(PathBuf::from("old.graphql"));
    let to = SchemaSource::Endpoint("http://localhost:4000/graphql".into());

    assert_eq!(
        comparing_line(&from, &to, false),
        "Comparing schema from old.graphql (file) to schema from http://localhost:4000/graphql (GraphQL endpoint)"
    );
}
