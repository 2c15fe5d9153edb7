//! 商品目录：实体、校验、持久化、表单、外壳状态机和 HTTP 处理器

pub mod form;
pub mod handler;
pub mod model;
pub mod repository;
pub mod shell;
pub mod validation;
pub mod view;

pub use form::{FormMode, ProductForm};
pub use model::{FieldEdit, FormField, Product, ProductCollection, ProductFormData};
pub use repository::{ProductRepository, PRODUCTS_KEY};
pub use shell::{Shell, ShellState, SubmitOutcome, View};
pub use validation::{validate, ValidationErrors};
