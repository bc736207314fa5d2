//! Partial updates.
//!
//! Each patch merges shallowly: a `Some` field overwrites, a `None` field
//! leaves the target untouched. Ids are not patchable.

use crate::{Columns, CoverPage, GlobalSettings, Product, Section};
use serde::{Deserialize, Serialize};

macro_rules! merge_fields {
    ($patch:expr, $target:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )*
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<Option<String>>,
    pub specs: Option<Vec<String>>,
    pub retail_price: Option<f64>,
    pub wholesale_price: Option<f64>,
    pub drop_price: Option<f64>,
    pub sold_out: Option<bool>,
    pub pieces_per_box: Option<u32>,
    pub image: Option<Option<String>>,
    pub category: Option<Option<String>>,
}

impl ProductPatch {
    pub fn merge_into(&self, product: &mut Product) {
        merge_fields!(
            self,
            product,
            [
                name,
                sku,
                specs,
                retail_price,
                wholesale_price,
                drop_price,
                sold_out,
                pieces_per_box,
                image,
                category,
            ]
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Section updates. The section type is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    pub title: Option<Option<String>>,
    pub columns: Option<Option<Columns>>,
}

impl SectionPatch {
    pub fn merge_into(&self, section: &mut Section) {
        merge_fields!(self, section, [title, columns]);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettingsPatch {
    pub primary_color: Option<String>,
    pub logo_url: Option<String>,
    pub footer_text: Option<String>,
    pub company_name: Option<String>,
    pub show_header: Option<bool>,
    pub header_title: Option<String>,
    pub header_subtitle: Option<String>,
    pub show_date: Option<bool>,
    pub show_pieces_per_box: Option<bool>,
}

impl GlobalSettingsPatch {
    pub fn merge_into(&self, settings: &mut GlobalSettings) {
        merge_fields!(
            self,
            settings,
            [
                primary_color,
                logo_url,
                footer_text,
                company_name,
                show_header,
                header_title,
                header_subtitle,
                show_date,
                show_pieces_per_box,
            ]
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverPagePatch {
    pub enabled: Option<bool>,
    pub image_url: Option<String>,
}

impl CoverPagePatch {
    pub fn merge_into(&self, cover: &mut CoverPage) {
        merge_fields!(self, cover, [enabled, image_url]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_patch_merges_only_set_fields() {
        let mut product = Product::new("p1", "Mug").with_prices(10.0, 8.0, 9.0);
        let patch = ProductPatch {
            name: Some("Big Mug".to_string()),
            sold_out: Some(true),
            ..Default::default()
        };

        patch.merge_into(&mut product);

        assert_eq!(product.id, "p1");
        assert_eq!(product.name, "Big Mug");
        assert!(product.sold_out);
        assert_eq!(product.retail_price, 10.0);
    }

    #[test]
    fn test_patch_can_clear_optional_field() {
        let mut product = Product::new("p1", "Mug");
        product.image = Some("mug.png".to_string());

        let patch = ProductPatch {
            image: Some(None),
            ..Default::default()
        };
        patch.merge_into(&mut product);

        assert_eq!(product.image, None);
    }

    #[test]
    fn test_global_settings_patch_from_json() {
        let patch: GlobalSettingsPatch =
            serde_json::from_str(r##"{"primaryColor":"#FF0000","showDate":false}"##).unwrap();
        let mut settings = GlobalSettings::default();
        patch.merge_into(&mut settings);

        assert_eq!(settings.primary_color, "#FF0000");
        assert!(!settings.show_date);
        assert_eq!(settings.company_name, "Minha Loja");
    }

    #[test]
    fn test_section_patch_keeps_type() {
        let mut section = Section::product_grid("s1", Columns::Three);
        SectionPatch {
            title: Some(Some("Novidades".to_string())),
            columns: Some(Some(Columns::Two)),
        }
        .merge_into(&mut section);

        assert!(section.is_product_grid());
        assert_eq!(section.title.as_deref(), Some("Novidades"));
        assert_eq!(section.columns, Some(Columns::Two));
    }
}
