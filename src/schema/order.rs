//! Order representation: dishes (genes) and chromosomes.

use serde::{Deserialize, Serialize};

use super::{Catalog, DishId};

/// One gene: a dish and how many of it to order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    pub quantity: u32,
}

impl Dish {
    pub fn new(id: impl Into<DishId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// A candidate order, one gene per catalog dish in catalog order.
///
/// Gene positions line up across every chromosome built from the same catalog,
/// which is what makes per-position crossover meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    pub genes: Vec<Dish>,
}

impl Chromosome {
    pub fn new(genes: Vec<Dish>) -> Self {
        Self { genes }
    }

    /// Zero-quantity chromosome over the catalog.
    pub fn empty(catalog: &Catalog) -> Self {
        Self {
            genes: catalog.iter().map(|(id, _)| Dish::new(id.clone(), 0)).collect(),
        }
    }

    /// Chromosome from per-position quantities. Extra quantities are ignored,
    /// missing ones are zero.
    pub fn from_quantities(catalog: &Catalog, quantities: &[u32]) -> Self {
        Self {
            genes: catalog
                .iter()
                .enumerate()
                .map(|(i, (id, _))| Dish::new(id.clone(), quantities.get(i).copied().unwrap_or(0)))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Sum of all gene quantities.
    pub fn total_quantity(&self) -> u64 {
        self.genes.iter().map(|g| g.quantity as u64).sum()
    }

    /// Quantities in locus order.
    pub fn quantities(&self) -> Vec<u32> {
        self.genes.iter().map(|g| g.quantity).collect()
    }

    /// Price of the whole order. Dishes unknown to the catalog cost nothing.
    pub fn total_cost(&self, catalog: &Catalog) -> f64 {
        self.genes
            .iter()
            .filter(|g| g.quantity > 0)
            .filter_map(|g| catalog.get(&g.id).map(|e| e.price * g.quantity as f64))
            .sum()
    }

    /// Non-zero genes joined with their catalog data.
    pub fn order_lines(&self, catalog: &Catalog) -> Vec<OrderLine> {
        self.genes
            .iter()
            .filter(|g| g.quantity > 0)
            .filter_map(|g| {
                let entry = catalog.get(&g.id)?;
                Some(OrderLine {
                    id: g.id.clone(),
                    name: entry.name.clone(),
                    restaurant: entry.restaurant.clone(),
                    cuisine: entry.cuisine.clone(),
                    quantity: g.quantity,
                    unit_price: entry.price,
                    line_cost: entry.price * g.quantity as f64,
                })
            })
            .collect()
    }
}

/// A dish line of a recommended order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: DishId,
    pub name: Option<String>,
    pub restaurant: Option<String>,
    pub cuisine: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_cost: f64,
}

impl std::fmt::Display for OrderLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} x {} [{}] @ {:.2} = {:.2}",
            self.quantity,
            self.name.as_deref().unwrap_or(&self.id),
            self.cuisine,
            self.unit_price,
            self.line_cost
        )
    }
}
