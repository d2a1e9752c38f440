//! Menu catalog and cuisine registry.
//!
//! Both tables are owned by the surrounding application and handed to the
//! optimizer already parsed. The JSON adapter at the bottom of this module is a
//! convenience for the CLI and demos; the optimizer never touches the filesystem.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Catalog key of a dish.
pub type DishId = String;

/// Static data for one dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Cuisine this dish belongs to.
    pub cuisine: String,
    /// Average rating of the dish.
    pub rating: f64,
    /// Unit price.
    pub price: f64,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Restaurant serving the dish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
}

impl CatalogEntry {
    /// Entry without display metadata.
    pub fn new(cuisine: impl Into<String>, rating: f64, price: f64) -> Self {
        Self {
            cuisine: cuisine.into(),
            rating,
            price,
            name: None,
            restaurant: None,
        }
    }
}

/// Read-only, ordered view over the menu.
///
/// Iteration order is the locus order of every chromosome built against this
/// catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(DishId, CatalogEntry)>,
    index: HashMap<DishId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty input, duplicate ids and non-finite numbers.
    pub fn new(entries: Vec<(DishId, CatalogEntry)>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, (id, entry)) in entries.iter().enumerate() {
            if !entry.rating.is_finite() {
                return Err(CatalogError::InvalidNumber {
                    dish: id.clone(),
                    field: "rating",
                });
            }
            if !entry.price.is_finite() {
                return Err(CatalogError::InvalidNumber {
                    dish: id.clone(),
                    field: "price",
                });
            }
            if index.insert(id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateDish(id.clone()));
            }
        }

        Ok(Self { entries, index })
    }

    /// Number of dishes (chromosome length).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a dish by id.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Locus of a dish id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Iterate dishes in locus order.
    pub fn iter(&self) -> impl Iterator<Item = (&DishId, &CatalogEntry)> {
        self.entries.iter().map(|(id, entry)| (id, entry))
    }

    /// Check that this catalog agrees with a cuisine registry.
    pub fn validate_against(&self, registry: &CuisineRegistry) -> Result<(), CatalogError> {
        if registry.total_dishes != self.len() {
            return Err(CatalogError::SizeMismatch {
                registry: registry.total_dishes,
                catalog: self.len(),
            });
        }

        let mut seen = HashSet::with_capacity(registry.cuisines.len());
        for cuisine in &registry.cuisines {
            if !seen.insert(cuisine.as_str()) {
                return Err(CatalogError::DuplicateCuisine(cuisine.clone()));
            }
        }

        for (id, entry) in self.iter() {
            if !seen.contains(entry.cuisine.as_str()) {
                return Err(CatalogError::UnknownCuisine {
                    dish: id.clone(),
                    cuisine: entry.cuisine.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Static list of cuisines and the catalog size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineRegistry {
    pub cuisines: Vec<String>,
    #[serde(rename = "totalDishes", alias = "total_dishes")]
    pub total_dishes: usize,
}

impl CuisineRegistry {
    /// Derive a registry listing cuisines in first-seen catalog order.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut cuisines: Vec<String> = Vec::new();
        for (_, entry) in catalog.iter() {
            if !cuisines.contains(&entry.cuisine) {
                cuisines.push(entry.cuisine.clone());
            }
        }

        Self {
            cuisines,
            total_dishes: catalog.len(),
        }
    }

    /// Position of a cuisine in the registry.
    pub fn index_of(&self, cuisine: &str) -> Option<usize> {
        self.cuisines.iter().position(|c| c == cuisine)
    }
}

/// Catalog and registry loaded together from a grouped menu document.
#[derive(Debug, Clone)]
pub struct Menu {
    pub catalog: Catalog,
    pub registry: CuisineRegistry,
}

/// Dish record as it appears in the grouped menu JSON.
#[derive(Debug, Deserialize)]
struct MenuDish {
    #[serde(rename = "dishID")]
    dish_id: RawDishId,
    #[serde(rename = "dishName", default)]
    name: Option<String>,
    #[serde(rename = "restName", default)]
    restaurant: Option<String>,
    price: f64,
    rating: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDishId {
    Text(String),
    Number(u64),
}

impl RawDishId {
    fn into_id(self) -> DishId {
        match self {
            RawDishId::Text(s) => s,
            RawDishId::Number(n) => n.to_string(),
        }
    }
}

impl Menu {
    /// Parse `{ "<cuisine>": [ { "dishID", "dishName", "restName", "price", "rating" } ] }`.
    ///
    /// Cuisine and dish order follow the document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let grouped: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut entries = Vec::new();
        let mut cuisines = Vec::with_capacity(grouped.len());
        for (cuisine, dishes) in grouped {
            let dishes: Vec<MenuDish> = serde_json::from_value(dishes)?;
            for dish in dishes {
                entries.push((
                    dish.dish_id.into_id(),
                    CatalogEntry {
                        cuisine: cuisine.clone(),
                        rating: dish.rating,
                        price: dish.price,
                        name: dish.name,
                        restaurant: dish.restaurant,
                    },
                ));
            }
            cuisines.push(cuisine);
        }

        let catalog = Catalog::new(entries)?;
        let registry = CuisineRegistry {
            cuisines,
            total_dishes: catalog.len(),
        };
        catalog.validate_against(&registry)?;

        Ok(Self { catalog, registry })
    }

    /// Read and parse a grouped menu file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Catalog and registry errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog must contain at least one dish")]
    Empty,
    #[error("Dish {0} appears more than once")]
    DuplicateDish(DishId),
    #[error("Cuisine {0} appears more than once in the registry")]
    DuplicateCuisine(String),
    #[error("Dish {dish} has a non-finite {field}")]
    InvalidNumber { dish: DishId, field: &'static str },
    #[error("Dish {dish} references unregistered cuisine {cuisine}")]
    UnknownCuisine { dish: DishId, cuisine: String },
    #[error("Registry lists {registry} dishes but catalog has {catalog}")]
    SizeMismatch { registry: usize, catalog: usize },
    #[error("Failed to read menu: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse menu: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MENU: &str = r#"{
        "italian": [
            {"dishID": "it-1", "dishName": "Margherita", "restName": "Roma", "price": 9.5, "rating": 4.2},
            {"dishID": "it-2", "dishName": "Carbonara", "restName": "Roma", "price": 12.0, "rating": 4.6}
        ],
        "indian": [
            {"dishID": 301, "dishName": "Dal", "price": 7.0, "rating": 4.0}
        ]
    }"#;

    fn entry(cuisine: &str) -> CatalogEntry {
        CatalogEntry::new(cuisine, 4.0, 10.0)
    }

    #[test]
    fn test_catalog_rejects_empty() {
        assert!(matches!(Catalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = Catalog::new(vec![("a".into(), entry("x")), ("a".into(), entry("x"))]);
        assert!(matches!(result, Err(CatalogError::DuplicateDish(id)) if id == "a"));
    }

    #[test]
    fn test_catalog_rejects_nan_price() {
        let mut bad = entry("x");
        bad.price = f64::NAN;
        let result = Catalog::new(vec![("a".into(), bad)]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidNumber { field: "price", .. })
        ));
    }

    #[test]
    fn test_registry_mismatch() {
        let catalog = Catalog::new(vec![("a".into(), entry("x")), ("b".into(), entry("y"))])
            .unwrap();

        let short = CuisineRegistry {
            cuisines: vec!["x".into(), "y".into()],
            total_dishes: 3,
        };
        assert!(matches!(
            catalog.validate_against(&short),
            Err(CatalogError::SizeMismatch { registry: 3, catalog: 2 })
        ));

        let missing = CuisineRegistry {
            cuisines: vec!["x".into()],
            total_dishes: 2,
        };
        assert!(matches!(
            catalog.validate_against(&missing),
            Err(CatalogError::UnknownCuisine { .. })
        ));

        assert!(
            catalog
                .validate_against(&CuisineRegistry::from_catalog(&catalog))
                .is_ok()
        );
    }

    #[test]
    fn test_menu_preserves_document_order() {
        let menu = Menu::from_json(MENU).unwrap();

        assert_eq!(menu.registry.cuisines, vec!["italian", "indian"]);
        assert_eq!(menu.registry.total_dishes, 3);

        let ids: Vec<&str> = menu.catalog.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["it-1", "it-2", "301"]);

        let dal = menu.catalog.get("301").unwrap();
        assert_eq!(dal.cuisine, "indian");
        assert_eq!(dal.name.as_deref(), Some("Dal"));
        assert_eq!(menu.catalog.position("it-2"), Some(1));
    }

    #[test]
    fn test_menu_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MENU.as_bytes()).unwrap();

        let menu = Menu::from_path(file.path()).unwrap();
        assert_eq!(menu.catalog.len(), 3);
    }

    #[test]
    fn test_menu_parse_error() {
        let result = Menu::from_json(r#"{"italian": [{"dishID": "x"}]}"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
