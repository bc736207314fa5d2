//! Canonical entity shapes and their default-construction rules.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A catalog line item.
///
/// Prices are non-negative amounts; `0.0` means the price is not shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<String>,
    #[serde(default)]
    pub retail_price: f64,
    #[serde(default)]
    pub wholesale_price: f64,
    #[serde(default)]
    pub drop_price: f64,
    #[serde(default)]
    pub sold_out: bool,
    #[serde(default = "default_pieces_per_box")]
    pub pieces_per_box: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Only consulted by the bulk import sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

fn default_pieces_per_box() -> u32 {
    1
}

impl Product {
    /// New product with zero prices, in stock, one piece per box.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: None,
            specs: Vec::new(),
            retail_price: 0.0,
            wholesale_price: 0.0,
            drop_price: 0.0,
            sold_out: false,
            pieces_per_box: default_pieces_per_box(),
            image: None,
            category: None,
        }
    }

    pub fn with_prices(mut self, retail: f64, wholesale: f64, drop: f64) -> Self {
        self.retail_price = retail;
        self.wholesale_price = wholesale;
        self.drop_price = drop;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Header,
    ProductGrid,
    Footer,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::ProductGrid => "product-grid",
            SectionType::Footer => "footer",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(SectionType::Header),
            "product-grid" => Ok(SectionType::ProductGrid),
            "footer" => Ok(SectionType::Footer),
            other => Err(ModelError::InvalidSectionType(other.to_string())),
        }
    }
}

/// Grid width of a product-grid section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Columns {
    Two,
    Three,
    Four,
}

impl Columns {
    pub fn count(self) -> usize {
        match self {
            Columns::Two => 2,
            Columns::Three => 3,
            Columns::Four => 4,
        }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Columns::Three
    }
}

impl TryFrom<u8> for Columns {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Columns::Two),
            3 => Ok(Columns::Three),
            4 => Ok(Columns::Four),
            other => Err(ModelError::InvalidColumns(other)),
        }
    }
}

impl From<Columns> for u8 {
    fn from(columns: Columns) -> u8 {
        columns.count() as u8
    }
}

/// A header block or a grid of products within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Columns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Arc<Product>>>,
}

impl Section {
    pub fn header(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_type: SectionType::Header,
            title: Some(title.into()),
            columns: None,
            products: None,
        }
    }

    /// Empty grid with the given column count.
    pub fn product_grid(id: impl Into<String>, columns: Columns) -> Self {
        Self {
            id: id.into(),
            section_type: SectionType::ProductGrid,
            title: None,
            columns: Some(columns),
            products: Some(Vec::new()),
        }
    }

    pub fn footer(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            section_type: SectionType::Footer,
            title: None,
            columns: None,
            products: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_products(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        self.products = Some(products.into_iter().map(Arc::new).collect());
        self
    }

    pub fn is_product_grid(&self) -> bool {
        self.section_type == SectionType::ProductGrid
    }

    /// Products in display order; empty for sections without a list.
    pub fn products(&self) -> &[Arc<Product>] {
        self.products.as_deref().unwrap_or(&[])
    }

    /// Mutable product list, created on first access.
    pub fn products_mut(&mut self) -> &mut Vec<Arc<Product>> {
        self.products.get_or_insert_with(Vec::new)
    }

    pub fn product_index(&self, product_id: &str) -> Option<usize> {
        self.products().iter().position(|p| p.id == product_id)
    }

    /// Effective grid width (3 when unset).
    pub fn column_count(&self) -> usize {
        self.columns.unwrap_or_default().count()
    }
}

/// A printable page: an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,
}

impl Page {
    pub fn new(id: impl Into<String>, sections: impl IntoIterator<Item = Section>) -> Self {
        Self {
            id: id.into(),
            sections: sections.into_iter().map(Arc::new).collect(),
        }
    }

    /// The shape every freshly added page gets: one empty 3-column grid.
    pub fn with_default_grid(id: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self::new(id, [Section::product_grid(section_id, Columns::Three)])
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id).map(|s| s.as_ref())
    }

    pub fn first_product_grid(&self) -> Option<usize> {
        self.sections.iter().position(|s| s.is_product_grid())
    }

    pub fn product_count(&self) -> usize {
        self.sections.iter().map(|s| s.products().len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverPage {
    pub enabled: bool,
    #[serde(default)]
    pub image_url: String,
}

/// Presentation defaults shared by every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub primary_color: String,
    pub logo_url: String,
    pub footer_text: String,
    pub company_name: String,
    pub show_header: bool,
    pub header_title: String,
    pub header_subtitle: String,
    pub show_date: bool,
    pub show_pieces_per_box: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            primary_color: "#00AEEF".to_string(),
            logo_url: String::new(),
            footer_text: "www.exemplo.com.br".to_string(),
            company_name: "Minha Loja".to_string(),
            show_header: true,
            header_title: "Catálogo de Produtos".to_string(),
            header_subtitle: "Ofertas Especiais".to_string(),
            show_date: true,
            show_pieces_per_box: true,
        }
    }
}

/// Root aggregate: the unit of undo/redo snapshots and of import/export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_page: Option<CoverPage>,
    pub pages: Vec<Arc<Page>>,
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

impl CatalogState {
    pub fn new(pages: impl IntoIterator<Item = Page>) -> Self {
        Self {
            cover_page: Some(CoverPage::default()),
            pages: pages.into_iter().map(Arc::new).collect(),
            global_settings: GlobalSettings::default(),
        }
    }

    /// The catalog a fresh editor opens with.
    pub fn sample() -> Self {
        let grid = Section::product_grid("section-2", Columns::Three).with_products([
            Product {
                pieces_per_box: 10,
                ..Product::new("prod-1", "Exemplo Produto 1").with_prices(99.90, 79.90, 89.90)
            },
            Product {
                sold_out: true,
                pieces_per_box: 5,
                ..Product::new("prod-2", "Exemplo Produto 2").with_prices(149.90, 119.90, 134.90)
            },
        ]);

        Self::new([Page::new(
            "page-1",
            [Section::header("section-1", "DESTAQUES DA SEMANA"), grid],
        )])
    }
}
