use pkgcache_types::{PackageFilter, PackageRecord, SortField, StoredPackage};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::Result;

const UPSERT_SQL: &str = r#"
    INSERT INTO packages (name, package_id, version, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?4)
    ON CONFLICT(package_id) DO UPDATE SET
        name = excluded.name,
        version = excluded.version,
        updated_at = excluded.updated_at
"#;

pub fn upsert(conn: &Connection, record: &PackageRecord, seen_at: &str) -> Result<()> {
    conn.prepare_cached(UPSERT_SQL)?.execute(params![
        &record.name,
        &record.package_id,
        &record.version,
        seen_at
    ])?;

    Ok(())
}

pub fn get_by_id(conn: &Connection, package_id: &str) -> Result<Option<StoredPackage>> {
    let package = conn
        .query_row(
            r#"
            SELECT name, package_id, version, created_at, updated_at
            FROM packages
            WHERE package_id = ?1
            "#,
            [package_id],
            map_row,
        )
        .optional()?;

    Ok(package)
}

pub fn count(conn: &Connection, filter: &PackageFilter) -> Result<u64> {
    let (where_clause, params) = build_where(filter);
    let query = format!("SELECT COUNT(*) FROM packages {}", where_clause);

    let param_refs: Vec<&dyn rusqlite::ToSql> =
        params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();
    let total: i64 = conn.query_row(&query, param_refs.as_slice(), |row| row.get(0))?;

    Ok(total as u64)
}

pub fn list(
    conn: &Connection,
    filter: &PackageFilter,
    sort: SortField,
    limit: u32,
    offset: u64,
) -> Result<Vec<StoredPackage>> {
    let (where_clause, filter_params) = build_where(filter);

    let query = format!(
        r#"
        SELECT name, package_id, version, created_at, updated_at
        FROM packages
        {}
        {}
        LIMIT ? OFFSET ?
        "#,
        where_clause,
        order_clause(sort)
    );

    let mut params: Vec<Box<dyn rusqlite::ToSql>> = filter_params
        .into_iter()
        .map(|p| Box::new(p) as Box<dyn rusqlite::ToSql>)
        .collect();
    params.push(Box::new(limit as i64));
    params.push(Box::new(offset as i64));

    let mut stmt = conn.prepare(&query)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let packages = stmt
        .query_map(param_refs.as_slice(), map_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(packages)
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredPackage> {
    Ok(StoredPackage {
        name: row.get(0)?,
        package_id: row.get(1)?,
        version: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

// Only filter values are bound; the clause text is fixed.
fn build_where(filter: &PackageFilter) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut params = Vec::new();

    if let Some(text) = &filter.text {
        clauses.push(r"(name LIKE ? ESCAPE '\' OR package_id LIKE ? ESCAPE '\')");
        let pattern = contains_pattern(text);
        params.push(pattern.clone());
        params.push(pattern);
    }

    if let Some(publisher) = &filter.publisher {
        clauses.push(r"package_id LIKE ? ESCAPE '\'");
        params.push(contains_pattern(publisher));
    }

    if clauses.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), params)
    }
}

// package_id breaks ties so pages never overlap or skip rows.
fn order_clause(sort: SortField) -> &'static str {
    match sort {
        SortField::Name => "ORDER BY name, package_id",
        SortField::PackageId => "ORDER BY package_id",
        SortField::Version => "ORDER BY version, package_id",
    }
}

/// LIKE pattern matching `value` as a literal substring.
fn contains_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
