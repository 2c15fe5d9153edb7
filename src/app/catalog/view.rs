//! 页面视图模型，由外壳状态渲染而来

use serde::Serialize;

use super::form::{FormMode, ProductForm};
use super::model::{Product, ProductCollection, ProductFormData};
use super::shell::{Shell, View};
use super::validation::{format_brl, ValidationErrors};
use crate::infrastructure::storage::KeyValueStore;

pub const LIST_TITLE: &str = "Catálogo de Produtos";
pub const EMPTY_MESSAGE: &str = "Não há produtos disponíveis";
pub const CREATE_TITLE: &str = "Adicionar Novo Produto";
pub const EDIT_TITLE: &str = "Editar Produto";
pub const NOT_FOUND_TITLE: &str = "Página não encontrada";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Page {
    Listing(ListView),
    Creating(FormView),
    Editing(FormView),
    NotFound(NotFoundView),
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub title: &'static str,
    pub products: Vec<ProductCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub values: ProductFormData,
    pub errors: ValidationErrors,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView {
    pub code: u16,
    pub title: &'static str,
    pub message: &'static str,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            price_label: format_brl(product.price),
        }
    }
}

impl ListView {
    pub fn render(products: &ProductCollection) -> Self {
        Self {
            title: LIST_TITLE,
            products: products.iter().map(ProductCard::from).collect(),
            empty_message: products.is_empty().then_some(EMPTY_MESSAGE),
        }
    }
}

impl FormView {
    pub fn render(form: &ProductForm) -> Self {
        let (title, submit_label) = match form.mode() {
            FormMode::Create => (CREATE_TITLE, "Criar Produto"),
            FormMode::Edit(_) => (EDIT_TITLE, "Salvar Alterações"),
        };
        Self {
            title,
            product_id: form.product_id().map(str::to_string),
            values: form.data().clone(),
            errors: form.errors().clone(),
            submit_label,
            submit_enabled: form.can_submit(),
        }
    }
}

impl NotFoundView {
    pub fn new() -> Self {
        Self {
            code: 404,
            title: NOT_FOUND_TITLE,
            message: "A página que você está procurando não existe.",
        }
    }
}

impl Default for NotFoundView {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn render<S: KeyValueStore>(shell: &Shell<S>) -> Self {
        match shell.view() {
            View::Listing => Page::Listing(ListView::render(shell.products())),
            View::Creating(form) => Page::Creating(FormView::render(form)),
            View::Editing(form) => Page::Editing(FormView::render(form)),
        }
    }

    pub fn not_found() -> Self {
        Page::NotFound(NotFoundView::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::model::seed_products;

    #[test]
    fn test_list_view_labels_prices() {
        let view = ListView::render(&seed_products());
        assert_eq!(view.products.len(), 3);
        assert_eq!(view.products[0].price_label, "R$ 2.599,99");
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn test_empty_list_view() {
        let view = ListView::render(&ProductCollection::new());
        assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_page_json_is_tagged() {
        let page = Page::Creating(FormView::render(&ProductForm::create()));
        let json = serde_json::to_value(page).unwrap();
        assert_eq!(json["view"], "creating");
        assert_eq!(json["title"], CREATE_TITLE);
        assert_eq!(json["submit_enabled"], false);
        assert!(json.get("product_id").is_none());
    }

    #[test]
    fn test_edit_form_view() {
        let products = seed_products();
        let view = FormView::render(&ProductForm::edit(&products.as_slice()[2]));
        assert_eq!(view.title, EDIT_TITLE);
        assert_eq!(view.product_id.as_deref(), Some("3"));
        assert_eq!(view.values.price, "599,5");
        assert!(view.submit_enabled);
    }
}
