use pkgcache_index::Database;
use pkgcache_types::{PackagePage, PackageQuery, StoredPackage};

use crate::Result;

pub struct QueryService<'a> {
    db: &'a Database,
}

impl<'a> QueryService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn run(&self, query: &PackageQuery) -> Result<PackagePage> {
        let filter = query.filter();
        let total = self.db.count_packages(&filter)?;
        let packages = self.db.list_packages(
            &filter,
            query.sort,
            query.page_size(),
            query.offset(),
        )?;

        tracing::debug!(
            total,
            page = query.page(),
            returned = packages.len(),
            sort = %query.sort,
            "package query"
        );

        Ok(PackagePage {
            packages,
            total,
            current_page: query.page(),
            total_pages: query.total_pages(total),
        })
    }

    pub fn microsoft(&self, sort: &str, page: u32, page_size: u32) -> Result<PackagePage> {
        self.run(&PackageQuery::microsoft(sort, page, page_size))
    }

    pub fn get(&self, package_id: &str) -> Result<Option<StoredPackage>> {
        Ok(self.db.get_package(package_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgcache_types::PackageRecord;

    fn seeded(count: usize) -> Database {
        let db = Database::open_in_memory().unwrap();
        let records: Vec<PackageRecord> = (0..count)
            .map(|i| PackageRecord::new(format!("App {i:03}"), format!("Pub.App{i:03}"), "1.0"))
            .collect();
        db.upsert_packages(&records, |_, _| {}).unwrap();
        db
    }

    #[test]
    fn test_empty_store_has_zero_pages() {
        let db = Database::open_in_memory().unwrap();
        let page = QueryService::new(&db).run(&PackageQuery::new()).unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
        assert!(page.packages.is_empty());
    }

    #[test]
    fn test_page_beyond_end_is_empty_but_reports_total() {
        let db = seeded(7);
        let query = PackageQuery::new().with_page(5, 3);
        let page = QueryService::new(&db).run(&query).unwrap();

        assert!(page.packages.is_empty());
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 5);
    }
}
