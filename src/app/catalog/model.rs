//! 商品目录数据模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 持久化的商品实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// 是否满足集合不变量：名称和描述非空，价格为正的有限数
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty()
            && !self.name.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.price.is_finite()
            && self.price > 0.0
    }
}

/// 表单编辑期间的原始输入，价格使用逗号作为小数分隔符
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
}

impl ProductFormData {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price: price.into(),
        }
    }

    /// 把三个字段拆成逐字段的更新操作
    pub fn into_edits(self) -> [FieldEdit; 3] {
        [
            FieldEdit::Name(self.name),
            FieldEdit::Description(self.description),
            FieldEdit::Price(self.price),
        ]
    }
}

/// 表单字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Description,
    Price,
}

/// 单个字段的更新操作
///
/// JSON 形式: `{"field": "price", "value": "19,90"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum FieldEdit {
    Name(String),
    Description(String),
    Price(String),
}

impl FieldEdit {
    pub fn field(&self) -> FormField {
        match self {
            FieldEdit::Name(_) => FormField::Name,
            FieldEdit::Description(_) => FormField::Description,
            FieldEdit::Price(_) => FormField::Price,
        }
    }

    pub fn apply_to(self, data: &mut ProductFormData) {
        match self {
            FieldEdit::Name(value) => data.name = value,
            FieldEdit::Description(value) => data.description = value,
            FieldEdit::Price(value) => data.price = value,
        }
    }
}

/// 有序且 id 唯一的商品集合，顺序即插入顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCollection(Vec<Product>);

impl ProductCollection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.0
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.0.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 追加到末尾；id 已存在时拒绝
    pub fn push(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.0.push(product);
        true
    }

    /// 原位替换同 id 的商品，位置不变
    pub fn replace(&mut self, product: Product) -> bool {
        match self.0.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    /// 删除指定 id，其余元素保持顺序；不存在时什么都不做
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.0.iter().position(|p| p.id == id)?;
        Some(self.0.remove(index))
    }

    /// 检查所有商品合法且 id 不重复
    pub fn check_invariants(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.0.len());
        self.0
            .iter()
            .all(|p| p.is_well_formed() && seen.insert(p.id.as_str()))
    }
}

impl From<Vec<Product>> for ProductCollection {
    fn from(products: Vec<Product>) -> Self {
        Self(products)
    }
}

/// 生成新的商品 id
pub fn new_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// 首次运行时写入存储的三个示例商品
pub fn seed_products() -> ProductCollection {
    ProductCollection(vec![
        Product {
            id: "1".to_string(),
            name: "Smartphone Galaxy Pro".to_string(),
            description: "Smartphone com tela de 6.7 polegadas, câmera de 108MP e 256GB de armazenamento. Ideal para uso profissional e pessoal.".to_string(),
            price: 2599.99,
        },
        Product {
            id: "2".to_string(),
            name: "Notebook Gamer Ultra".to_string(),
            description: "Notebook gamer com processador Intel i7, 16GB RAM, SSD 1TB e placa de vídeo RTX 4060. Perfeito para jogos e trabalho.".to_string(),
            price: 4999.90,
        },
        Product {
            id: "3".to_string(),
            name: "Fone Bluetooth Premium".to_string(),
            description: "Fone de ouvido sem fio com cancelamento de ruído ativo, 30 horas de bateria e qualidade de som Hi-Fi.".to_string(),
            price: 599.50,
        },
    ])
}
