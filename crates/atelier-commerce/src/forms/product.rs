//! Admin product form.

use crate::catalog::Product;
use crate::forms::{require, FieldError};
use crate::money::Money;
use crate::CommerceError;
use std::path::PathBuf;

/// One field change on the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductUpdate {
    Title(String),
    Description(String),
    /// Raw price text as typed.
    Price(String),
    /// Raw stock text as typed.
    Stock(String),
    Category(String),
    /// Comma-separated sizes (e.g., "S, M, L").
    Sizes(String),
    /// Comma-separated colors.
    Colors(String),
    /// Drop an already-uploaded image URL.
    RemoveExistingImage(String),
    /// Queue a local file for upload.
    AddImage(PathBuf),
    /// Unqueue a local file.
    RemoveImage(PathBuf),
}

/// A multipart body part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: &'static str, value: String },
    File { name: &'static str, path: PathBuf },
}

/// Create/edit product form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub size_options: Vec<String>,
    pub color_options: Vec<String>,
    /// Image URLs kept from the product being edited.
    pub existing_images: Vec<String>,
    /// Local files to upload.
    pub new_images: Vec<PathBuf>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from a product for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display_amount(),
            stock: product.stock.to_string(),
            category: product.category.clone(),
            size_options: product.size_options.clone(),
            color_options: product.color_options.clone(),
            existing_images: product.images.clone(),
            new_images: Vec::new(),
        }
    }

    pub fn apply(&mut self, update: ProductUpdate) {
        match update {
            ProductUpdate::Title(v) => self.title = v,
            ProductUpdate::Description(v) => self.description = v,
            ProductUpdate::Price(v) => self.price = v,
            ProductUpdate::Stock(v) => self.stock = v,
            ProductUpdate::Category(v) => self.category = v,
            ProductUpdate::Sizes(v) => self.size_options = split_list(&v),
            ProductUpdate::Colors(v) => self.color_options = split_list(&v),
            ProductUpdate::RemoveExistingImage(url) => self.existing_images.retain(|i| i != &url),
            ProductUpdate::AddImage(path) => {
                if !self.new_images.contains(&path) {
                    self.new_images.push(path);
                }
            }
            ProductUpdate::RemoveImage(path) => self.new_images.retain(|p| p != &path),
        }
    }

    /// Validate, returning the parsed price and stock.
    pub fn validate(&self) -> Result<(Money, u32), CommerceError> {
        let mut errors = Vec::new();
        require(&mut errors, "title", "Title", &self.title);
        require(&mut errors, "description", "Description", &self.description);
        require(&mut errors, "category", "Category", &self.category);

        let price = match self.price.trim().parse::<Money>() {
            Ok(p) if !p.is_negative() => Some(p),
            _ => {
                errors.push(FieldError::new("price", "Price must be a non-negative number"));
                None
            }
        };
        let stock = match self.stock.trim().parse::<u32>() {
            Ok(s) => Some(s),
            Err(_) => {
                errors.push(FieldError::new("stock", "Stock must be a whole number"));
                None
            }
        };

        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok((price, stock)),
            _ => Err(CommerceError::Validation(errors)),
        }
    }

    /// Validate and lay the form out as multipart parts.
    ///
    /// List fields travel as JSON arrays in text parts; each new image is
    /// its own `images` file part.
    pub fn to_parts(&self) -> Result<Vec<FormPart>, CommerceError> {
        let (price, stock) = self.validate()?;

        let text = |name, value: String| FormPart::Text { name, value };
        let mut parts = vec![
            text("title", self.title.trim().to_string()),
            text("description", self.description.trim().to_string()),
            text("price", price.display_amount()),
            text("stock", stock.to_string()),
            text("category", self.category.trim().to_string()),
            text("sizeOptions", json_list(&self.size_options)),
            text("colorOptions", json_list(&self.color_options)),
            text("existingImages", json_list(&self.existing_images)),
        ];
        parts.extend(self.new_images.iter().map(|path| FormPart::File {
            name: "images",
            path: path.clone(),
        }));
        Ok(parts)
    }
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn json_list(values: &[String]) -> String {
    serde_json::Value::from(values.to_vec()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        let mut form = ProductForm::new();
        form.apply(ProductUpdate::Title("Linen Shirt".into()));
        form.apply(ProductUpdate::Description("Breathable".into()));
        form.apply(ProductUpdate::Price("39.90".into()));
        form.apply(ProductUpdate::Stock("12".into()));
        form.apply(ProductUpdate::Category("Tops".into()));
        form.apply(ProductUpdate::Sizes("S, M,,L ".into()));
        form
    }

    fn text<'a>(parts: &'a [FormPart], name: &str) -> Option<&'a str> {
        parts.iter().find_map(|p| match p {
            FormPart::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_sizes_are_split_and_trimmed() {
        assert_eq!(filled().size_options, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_invalid_numbers() {
        let mut form = filled();
        form.apply(ProductUpdate::Price("-4".into()));
        form.apply(ProductUpdate::Stock("many".into()));
        match form.validate() {
            Err(CommerceError::Validation(errors)) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["price", "stock"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parts_layout() {
        let mut form = filled();
        form.apply(ProductUpdate::AddImage(PathBuf::from("front.jpg")));
        form.apply(ProductUpdate::AddImage(PathBuf::from("front.jpg")));

        let parts = form.to_parts().unwrap();
        assert_eq!(text(&parts, "price"), Some("39.90"));
        assert_eq!(text(&parts, "sizeOptions"), Some(r#"["S","M","L"]"#));
        assert_eq!(text(&parts, "colorOptions"), Some("[]"));
        assert_eq!(text(&parts, "existingImages"), Some("[]"));
        let files = parts.iter().filter(|p| matches!(p, FormPart::File { .. })).count();
        assert_eq!(files, 1);
    }

    #[test]
    fn test_edit_keeps_existing_images() {
        let product = Product::new("p1", "Coat", Money::from_cents(18900))
            .with_stock(2)
            .with_category("Outerwear")
            .with_image("/uploads/a.jpg")
            .with_image("/uploads/b.jpg");
        let mut form = ProductForm::from_product(&product);
        assert_eq!(form.price, "189.00");

        form.apply(ProductUpdate::Description("Warm wool".into()));
        form.apply(ProductUpdate::RemoveExistingImage("/uploads/a.jpg".into()));
        let parts = form.to_parts().unwrap();
        assert_eq!(text(&parts, "existingImages"), Some(r#"["/uploads/b.jpg"]"#));
    }
}
