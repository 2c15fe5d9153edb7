//! 商品表单（新建 / 编辑）

use super::model::{new_product_id, FieldEdit, FormField, Product, ProductFormData};
use super::validation::{
    format_price_input, parse_price, validate, ValidationErrors, PRICE_NOT_POSITIVE,
};

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    /// 保留原商品，提交时沿用其 id
    Edit(Product),
}

/// 单次编辑会话的表单状态，不会在表单生命周期之外共享
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    mode: FormMode,
    data: ProductFormData,
    errors: ValidationErrors,
}

impl ProductForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            data: ProductFormData::default(),
            errors: ValidationErrors::new(),
        }
    }

    /// 用已有商品回填表单，价格转成逗号小数
    pub fn edit(product: &Product) -> Self {
        Self {
            data: ProductFormData {
                name: product.name.clone(),
                description: product.description.clone(),
                price: format_price_input(product.price),
            },
            mode: FormMode::Edit(product.clone()),
            errors: ValidationErrors::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn data(&self) -> &ProductFormData {
        &self.data
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// 正在编辑的商品 id，新建表单为 `None`
    pub fn product_id(&self) -> Option<&str> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit(original) => Some(&original.id),
        }
    }

    /// 三个字段都为空
    pub fn is_blank(&self) -> bool {
        self.data.name.is_empty() && self.data.description.is_empty() && self.data.price.is_empty()
    }

    /// 新建表单全空时禁止提交
    pub fn can_submit(&self) -> bool {
        match self.mode {
            FormMode::Create => !self.is_blank(),
            FormMode::Edit(_) => true,
        }
    }

    /// 更新一个字段，只清除该字段的错误，不重新校验
    pub fn apply(&mut self, edit: FieldEdit) {
        self.errors.clear(edit.field());
        edit.apply_to(&mut self.data);
    }

    /// 校验并生成商品；失败时保存错误，表单保持打开
    pub fn submit(&mut self) -> Result<Product, ValidationErrors> {
        let errors = validate(&self.data);
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }
        self.errors = ValidationErrors::new();

        let Some(price) = parse_price(&self.data.price) else {
            self.errors.insert(FormField::Price, PRICE_NOT_POSITIVE);
            return Err(self.errors.clone());
        };
        let id = match &self.mode {
            FormMode::Create => new_product_id(),
            FormMode::Edit(original) => original.id.clone(),
        };

        Ok(Product {
            id,
            name: self.data.name.trim().to_string(),
            description: self.data.description.trim().to_string(),
            price,
        })
    }
}
