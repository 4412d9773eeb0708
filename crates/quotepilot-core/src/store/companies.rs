//! Company persistence with category and global indexes.

use tracing::debug;

use super::{add_to_index, check_id, get_json, put_json, read_index, remove_from_index, KvStore, StoreResult};
use crate::models::Company;

const INDEX_KEY: &str = "company:index";

fn key(id: &str) -> String {
    format!("company:{id}")
}

fn category_key(category: &str) -> String {
    format!("company:category:{category}")
}

/// Companies stored under `company:{id}`, indexed globally and by industry.
pub struct CompanyRepository<S> {
    store: S,
}

impl<S: KvStore> CompanyRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store a company and register it in the indexes.
    ///
    /// Re-saving with a different industry moves the company to the new
    /// category index. Ids that would collide with an index key are
    /// rejected.
    pub fn save(&self, company: &Company) -> StoreResult<()> {
        check_id(&company.id, &["category:"])?;
        let previous: Option<Company> = get_json(&self.store, &key(&company.id))?;
        put_json(&self.store, &key(&company.id), company)?;

        if let Some(old) = previous.and_then(|p| p.industry) {
            if company.industry.as_deref() != Some(old.as_str()) {
                remove_from_index(&self.store, &category_key(&old), &company.id)?;
            }
        }
        if let Some(industry) = &company.industry {
            add_to_index(&self.store, &category_key(industry), &company.id)?;
        }
        add_to_index(&self.store, INDEX_KEY, &company.id)?;

        debug!("Saved company {} ({})", company.id, company.name);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Company>> {
        get_json(&self.store, &key(id))
    }

    /// Companies indexed under exactly `category`, in index order.
    pub fn search_by_category(&self, category: &str) -> StoreResult<Vec<Company>> {
        self.load_all(read_index(&self.store, &category_key(category))?)
    }

    /// Companies whose name contains `name` (case-sensitive).
    pub fn search_by_name(&self, name: &str) -> StoreResult<Vec<Company>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|company| company.name.contains(name))
            .collect())
    }

    pub fn find_all(&self) -> StoreResult<Vec<Company>> {
        self.load_all(read_index(&self.store, INDEX_KEY)?)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(read_index(&self.store, INDEX_KEY)?.is_empty())
    }

    fn load_all(&self, ids: Vec<String>) -> StoreResult<Vec<Company>> {
        let mut companies = Vec::with_capacity(ids.len());
        for id in ids {
            match self.find_by_id(&id)? {
                Some(company) => companies.push(company),
                None => debug!("Index refers to missing company {}", id),
            }
        }
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn ids(companies: &[Company]) -> Vec<&str> {
        companies.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_category_and_name_search() {
        let repo = CompanyRepository::new(MemoryStore::new());
        repo.save(&Company::new("a", "テックA株式会社").with_industry("IT・システム開発")).unwrap();
        repo.save(&Company::new("b", "デザインB").with_industry("デザイン・クリエイティブ")).unwrap();
        repo.save(&Company::new("c", "テックC").with_industry("IT・システム開発")).unwrap();
        repo.save(&Company::new("d", "無所属D")).unwrap();

        assert_eq!(ids(&repo.search_by_category("IT・システム開発").unwrap()), vec!["a", "c"]);
        assert_eq!(ids(&repo.search_by_category("製造・生産").unwrap()), Vec::<&str>::new());
        assert_eq!(ids(&repo.search_by_name("テック").unwrap()), vec!["a", "c"]);
        assert_eq!(ids(&repo.find_all().unwrap()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_name_search_is_case_sensitive() {
        let repo = CompanyRepository::new(MemoryStore::new());
        repo.save(&Company::new("a", "Acme Studio")).unwrap();
        assert_eq!(repo.search_by_name("Acme").unwrap().len(), 1);
        assert!(repo.search_by_name("acme").unwrap().is_empty());
    }

    #[test]
    fn test_resave_does_not_duplicate_and_moves_category() {
        let store = MemoryStore::new();
        let repo = CompanyRepository::new(&store);
        let company = Company::new("a", "A").with_industry("コンサルティング");
        repo.save(&company).unwrap();
        repo.save(&company).unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 1);

        repo.save(&company.clone().with_industry("その他")).unwrap();
        assert!(repo.search_by_category("コンサルティング").unwrap().is_empty());
        assert_eq!(ids(&repo.search_by_category("その他").unwrap()), vec!["a"]);
    }

    #[test]
    fn test_index_shaped_ids_are_rejected() {
        let store = MemoryStore::new();
        let repo = CompanyRepository::new(&store);
        repo.save(&Company::new("a", "A").with_industry("その他")).unwrap();

        for id in ["index", "category:その他", ""] {
            let result = repo.save(&Company::new(id, "Intruder"));
            assert!(matches!(result, Err(StoreError::ReservedId { .. })), "id {id:?}");
        }

        assert_eq!(ids(&repo.find_all().unwrap()), vec!["a"]);
        assert_eq!(ids(&repo.search_by_category("その他").unwrap()), vec!["a"]);
    }

    #[test]
    fn test_is_empty() {
        let repo = CompanyRepository::new(MemoryStore::new());
        assert!(repo.is_empty().unwrap());
        repo.save(&Company::new("a", "A")).unwrap();
        assert!(!repo.is_empty().unwrap());
    }
}
