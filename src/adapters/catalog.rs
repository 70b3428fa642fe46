use crate::core::{Category, Dish, FoodCatalog};
use crate::utils::error::{DinnerError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Fixed list of dishes held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFoodCatalog {
    dishes: Vec<Dish>,
}

impl InMemoryFoodCatalog {
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self { dishes }
    }
}

#[async_trait]
impl FoodCatalog for InMemoryFoodCatalog {
    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        Ok(self.dishes.clone())
    }
}

#[derive(Debug, Deserialize)]
struct DishRow {
    name: String,
    category: String,
}

/// Catalog read from a `name,category` CSV file on every call, so edits to
/// the file are picked up without a restart.
#[derive(Debug, Clone)]
pub struct CsvFoodCatalog {
    path: PathBuf,
}

impl CsvFoodCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses catalog rows. Rows with an unknown category or a blank name are
/// skipped and logged so the rest of the catalog stays usable; a malformed
/// CSV file still fails as a whole.
pub fn parse_catalog_csv(data: &[u8]) -> Result<Vec<Dish>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut dishes = Vec::new();
    for (index, row) in reader.deserialize::<DishRow>().enumerate() {
        let row = row?;
        match parse_row(&row) {
            Ok(dish) => dishes.push(dish),
            Err(DinnerError::InvalidDish { message }) => {
                tracing::error!(row = index + 1, name = %row.name, "skipping catalog row: {}", message);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(dishes)
}

fn parse_row(row: &DishRow) -> Result<Dish> {
    let category: Category = row.category.parse()?;
    Dish::new(row.name.clone(), category)
}

#[async_trait]
impl FoodCatalog for CsvFoodCatalog {
    async fn list_dishes(&self) -> Result<Vec<Dish>> {
        tracing::debug!("Reading food catalog from {}", self.path.display());
        let data = tokio::fs::read(&self.path).await?;
        let dishes = parse_catalog_csv(&data)?;
        tracing::debug!("Loaded {} dishes", dishes.len());
        Ok(dishes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_names_and_codes() {
        let csv = b"name,category\nBorscht,soup\nCaesar, Salad\nSteak,3\nRice,side_dish\n";
        let dishes = parse_catalog_csv(csv).unwrap();

        assert_eq!(dishes.len(), 4);
        assert_eq!(dishes[1].name, "Caesar");
        assert_eq!(dishes[1].category, Category::Salad);
        assert_eq!(dishes[2].category, Category::Meat);
        assert_eq!(dishes[3].category, Category::SideDish);
    }

    #[test]
    fn test_unknown_category_rows_are_skipped() {
        let csv = b"name,category\nSoup1,soup\nCake,9\nSoup2,soup\nPie,dessert\n";
        let dishes = parse_catalog_csv(csv).unwrap();

        let names: Vec<&str> = dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Soup1", "Soup2"]);
    }

    #[test]
    fn test_empty_name_rows_are_skipped() {
        let dishes = parse_catalog_csv(b"name,category\n,soup\nRice,side_dish\n").unwrap();
        assert_eq!(dishes, vec![Dish::new("Rice", Category::SideDish).unwrap()]);
    }

    #[test]
    fn test_malformed_csv_fails_whole_catalog() {
        let err = parse_catalog_csv(b"name,category\nSoup1\n").unwrap_err();
        assert!(matches!(err, DinnerError::CsvError(_)));
    }

    #[test]
    fn test_category_error_message_is_not_nested() {
        let err = "9".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid dish: unknown category code 9");
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        assert!(parse_catalog_csv(b"name,category\n").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_csv_catalog_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,category\nPlov,meat\nBuckwheat,4").unwrap();

        let catalog = CsvFoodCatalog::new(file.path());
        let dishes = catalog.list_dishes().await.unwrap();

        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[1].category, Category::SideDish);
    }

    #[tokio::test]
    async fn test_missing_file_is_storage_error() {
        let catalog = CsvFoodCatalog::new("/definitely/not/here/foods.csv");
        let err = catalog.list_dishes().await.unwrap_err();
        assert!(matches!(err, DinnerError::IoError(_)));
    }
}
