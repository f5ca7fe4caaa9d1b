use crate::core::{Country, CountryStore, Storage};
use crate::domain::model::CSV_HEADER;
use crate::utils::error::PersistError;
use async_trait::async_trait;

/// Writes the full country list as `countries.csv`-style output through a [`Storage`].
#[derive(Debug, Clone)]
pub struct CsvCountryStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> CsvCountryStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }
}

pub fn render_csv(countries: &[Country]) -> Result<Vec<u8>, PersistError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for country in countries {
        writer.write_record([&country.name, &country.capital, &country.currency])?;
    }

    writer
        .into_inner()
        .map_err(|e| PersistError::Io(e.into_error()))
}

#[async_trait]
impl<S: Storage> CountryStore for CsvCountryStore<S> {
    async fn persist(&self, countries: &[Country]) -> Result<String, PersistError> {
        let data = render_csv(countries)?;

        tracing::debug!(
            "Writing {} countries ({} bytes) to {}",
            countries.len(),
            data.len(),
            self.file_name
        );
        let location = self.storage.write_file(&self.file_name, &data).await?;

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> std::io::Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                )
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> std::io::Result<String> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(path.to_string())
        }
    }

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        async fn read_file(&self, _path: &str) -> std::io::Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn write_file(&self, _path: &str, _data: &[u8]) -> std::io::Result<String> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only file system",
            ))
        }
    }

    fn abc() -> Vec<Country> {
        vec![
            Country::new("A", "Capital A", "AAA"),
            Country::new("B", "Capital B", "BBB"),
            Country::new("C", "Capital C", "CCC"),
        ]
    }

    #[test]
    fn test_render_header_and_rows_in_order() {
        let data = render_csv(&abc()).unwrap();
        let content = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Country Name,Capital,Currency");
        assert_eq!(lines[1], "A,Capital A,AAA");
        assert_eq!(lines[2], "B,Capital B,BBB");
        assert_eq!(lines[3], "C,Capital C,CCC");
    }

    #[test]
    fn test_render_quotes_fields_with_commas() {
        let data = render_csv(&[Country::new("Zimbabwe", "Harare", "USD,ZAR,BWP")]).unwrap();
        let content = String::from_utf8(data).unwrap();

        assert_eq!(
            content,
            "Country Name,Capital,Currency\r\nZimbabwe,Harare,\"USD,ZAR,BWP\"\r\n"
        );
    }

    #[test]
    fn test_render_rows_end_with_crlf() {
        let data = render_csv(&abc()).unwrap();
        let content = String::from_utf8(data).unwrap();

        assert_eq!(content.matches("\r\n").count(), 4);
        assert_eq!(content.matches('\n').count(), 4);
        assert!(content.ends_with("C,Capital C,CCC\r\n"));
    }

    #[test]
    fn test_render_empty_list_is_header_only() {
        let data = render_csv(&[]).unwrap();
        assert_eq!(data, b"Country Name,Capital,Currency\r\n");
    }

    #[tokio::test]
    async fn test_persist_replaces_previous_output() {
        let storage = MockStorage::new();
        let store = CsvCountryStore::new(storage.clone(), "countries.csv");

        store.persist(&abc()).await.unwrap();
        let location = store
            .persist(&[Country::new("D", "Capital D", "DDD")])
            .await
            .unwrap();

        assert_eq!(location, "countries.csv");
        let content = storage.read_file("countries.csv").await.unwrap();
        let content = String::from_utf8(content).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("D,Capital D,DDD"));
        assert!(!content.contains("Capital A"));
    }

    #[tokio::test]
    async fn test_persist_to_local_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
        let store = CsvCountryStore::new(storage, "countries.csv");

        store.persist(&abc()).await.unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("countries.csv")).unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[tokio::test]
    async fn test_persist_reports_write_failure() {
        let store = CsvCountryStore::new(ReadOnlyStorage, "countries.csv");
        let err = store.persist(&abc()).await.unwrap_err();

        assert!(matches!(err, PersistError::Io(_)));
    }
}
