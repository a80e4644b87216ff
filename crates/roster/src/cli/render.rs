//! Plain-text rendering. Every function returns a `String` so output can be
//! checked in tests without capturing stdout.

use rosterapp::api::GridView;
use rosterapp::model::{AttributeDefinition, AttributeValue, Owner};
use rosterapp::paginate::Page;

/// Left-aligned columns separated by two spaces.
pub fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers)];
    out.extend(rows.iter().map(|row| line(row.as_slice())));
    out.join("\n")
}

/// "Page 2 of 3, showing 11-20 of 25" style footer.
pub fn page_footer<T>(page: &Page<T>) -> String {
    match page.display_range() {
        Some((first, last)) => format!(
            "Page {} of {}, showing {}-{} of {}",
            page.page_index + 1,
            page.total_pages,
            first,
            last,
            page.total_items
        ),
        None => format!(
            "Page {} of {}, no results",
            page.page_index + 1,
            page.total_pages
        ),
    }
}

pub fn grid(view: &GridView) -> String {
    let mut headers = vec!["#".to_string()];
    headers.extend(view.columns.iter().map(|c| c.label.clone()));
    let rows: Vec<Vec<String>> = view
        .page
        .items
        .iter()
        .map(|row| {
            let mut cells = vec![row.owner_id.to_string()];
            cells.extend(row.cells.iter().cloned());
            cells
        })
        .collect();
    format!("{}\n\n{}", table(&headers, &rows), page_footer(&view.page))
}

pub fn owners(owners: &[Owner]) -> String {
    let headers = ["#", "Name", "Email", "Status"].map(String::from);
    let rows: Vec<Vec<String>> = owners
        .iter()
        .map(|o| {
            vec![
                o.id.to_string(),
                o.full_name.clone(),
                o.email.clone().unwrap_or_default(),
                if o.is_active { "active" } else { "inactive" }.to_string(),
            ]
        })
        .collect();
    table(&headers, &rows)
}

pub fn owner_detail(owner: &Owner) -> String {
    let optional = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let lines = [
        ("Id", owner.id.to_string()),
        ("Name", owner.full_name.clone()),
        ("Email", optional(&owner.email)),
        ("Phone", optional(&owner.phone)),
        ("Address", optional(&owner.address)),
        ("Date of birth", optional(&owner.date_of_birth)),
        ("Gender", optional(&owner.gender)),
        ("Document", {
            match (&owner.document_type, &owner.document_number) {
                (Some(t), Some(n)) => format!("{} {}", t, n),
                (None, Some(n)) => n.clone(),
                (Some(t), None) => t.clone(),
                (None, None) => "-".to_string(),
            }
        }),
        (
            "Status",
            if owner.is_active { "active" } else { "inactive" }.to_string(),
        ),
        (
            "Registered",
            owner.registration_date.format("%Y-%m-%d %H:%M").to_string(),
        ),
        ("Notes", optional(&owner.notes)),
    ];
    lines
        .iter()
        .map(|(k, v)| format!("{:<14}{}", format!("{}:", k), v))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn definitions(definitions: &[AttributeDefinition]) -> String {
    let headers = ["#", "Name", "Kind", "Required", "Active"].map(String::from);
    let rows: Vec<Vec<String>> = definitions
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.name.clone(),
                d.kind.to_string(),
                yes_no(d.required),
                yes_no(d.active),
            ]
        })
        .collect();
    table(&headers, &rows)
}

/// Values with the definition name resolved. Long encoded content is
/// shortened.
pub fn values(values: &[AttributeValue], definitions: &[AttributeDefinition]) -> String {
    let headers = ["#", "Field", "Value"].map(String::from);
    let rows: Vec<Vec<String>> = values
        .iter()
        .map(|v| {
            let field = definitions
                .iter()
                .find(|d| d.id == v.definition_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| format!("#{}", v.definition_id));
            let shown = match &v.artifact_name {
                Some(name) => format!("{} ({} bytes encoded)", name, v.value.len()),
                None => shorten(&v.value, 60),
            };
            vec![v.id.to_string(), field, shown]
        })
        .collect();
    table(&headers, &rows)
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterapp::paginate::paginate;

    #[test]
    fn test_table_aligns_columns() {
        let headers = vec!["#".to_string(), "Name".to_string()];
        let rows = vec![
            vec!["1".to_string(), "Ana".to_string()],
            vec!["12".to_string(), "Bea".to_string()],
        ];
        assert_eq!(table(&headers, &rows), "#   Name\n1   Ana\n12  Bea");
    }

    #[test]
    fn test_page_footer() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(
            page_footer(&paginate(&items, 1, 10)),
            "Page 2 of 3, showing 11-20 of 25"
        );
        assert_eq!(
            page_footer(&paginate::<u32>(&[], 0, 10)),
            "Page 1 of 1, no results"
        );
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("abc", 10), "abc");
        assert_eq!(shorten("abcdefghij", 6), "abc...");
    }
}
