use std::path::Path;

use anyhow::{Context, Result};
use impacters_core::Store;
use impacters_core::csv_import::parse_members_csv;
use owo_colors::OwoColorize;

/// Read a members CSV and add every row. Nothing is added if any check fails.
pub async fn run(store: &mut Store, path: &Path) -> Result<()> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;

    let drafts = parse_members_csv(&text)?;
    let count = store.bulk_add_members(drafts).len();

    println!(
        "{} {} {} from {}",
        "Imported".green(),
        count,
        if count == 1 { "member" } else { "members" },
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn imports_rows_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.csv");
        std::fs::write(
            &path,
            "Name,Email,Phone,Birthday,Anniversary\r\nAlice,a@x.com,555,2000-01-01,\r\n\r\nBob,,,,2010-10-10\r\n",
        )
        .unwrap();

        let mut store = Store::with_demo_data();
        run(&mut store, &path).await.unwrap();

        assert_eq!(store.members().len(), 6);
        let alice = &store.members()[4];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.birthday, NaiveDate::from_ymd_opt(2000, 1, 1));
        assert_eq!(alice.anniversary, None);
        assert_eq!(store.members()[5].anniversary, NaiveDate::from_ymd_opt(2010, 10, 10));
    }

    #[tokio::test]
    async fn missing_columns_add_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.csv");
        std::fs::write(&path, "email,name,phone\na@x.com,Alice,555\n").unwrap();

        let mut store = Store::new();
        let err = run(&mut store, &path).await.unwrap_err();

        assert!(err.to_string().contains("birthday, anniversary"));
        assert!(store.members().is_empty());
    }

    #[tokio::test]
    async fn unreadable_file_is_reported() {
        let mut store = Store::new();
        let err = run(&mut store, Path::new("/nonexistent/members.csv")).await.unwrap_err();
        assert!(err.to_string().starts_with("Could not read"));
    }
}
