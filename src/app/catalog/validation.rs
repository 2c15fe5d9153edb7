//! 表单校验与价格格式

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{FormField, ProductFormData};

pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const DESCRIPTION_REQUIRED: &str = "Descrição é obrigatória";
pub const PRICE_REQUIRED: &str = "Preço é obrigatório";
pub const PRICE_NOT_POSITIVE: &str = "Preço deve ser um número positivo";

/// 字段级错误信息；没有对应键表示该字段当前有效
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// 清除单个字段的错误，返回之前是否存在
    pub fn clear(&mut self, field: FormField) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// 校验表单输入，无副作用
pub fn validate(form: &ProductFormData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }

    if form.description.trim().is_empty() {
        errors.insert(FormField::Description, DESCRIPTION_REQUIRED);
    }

    if form.price.trim().is_empty() {
        errors.insert(FormField::Price, PRICE_REQUIRED);
    } else {
        match parse_price(&form.price) {
            Some(price) if price.is_finite() && price > 0.0 => {}
            _ => errors.insert(FormField::Price, PRICE_NOT_POSITIVE),
        }
    }

    errors
}

/// 解析用户输入的价格
///
/// 第一个逗号替换为小数点，跳过前导空白后取最长的十进制数字前缀，
/// 因此 "12abc" 解析为 12。找不到数字时返回 `None`。
pub fn parse_price(raw: &str) -> Option<f64> {
    let normalized = raw.replacen(',', ".", 1);
    let s = normalized.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_count = frac_end - (end + 1);
        if digit_count + frac_count > 0 {
            digit_count += frac_count;
            end = frac_end;
        }
    }

    if digit_count == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// 编辑表单回填用的价格字符串，小数点换成逗号
pub fn format_price_input(price: f64) -> String {
    price.to_string().replacen('.', ",", 1)
}

/// 列表卡片上显示的价格，例如 "R$ 2.599,99"
pub fn format_brl(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let reais = (cents / 100).to_string();

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, ch) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str, price: &str) -> ProductFormData {
        ProductFormData::new(name, description, price)
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&form("Caneca", "Caneca de cerâmica", "19,90")).is_empty());
    }

    #[test]
    fn test_blank_name_only() {
        let errors = validate(&form("", "x", "10"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));

        let errors = validate(&form("   ", "x", "10"));
        assert!(errors.contains(FormField::Name));
    }

    #[test]
    fn test_all_fields_blank() {
        let errors = validate(&form(" ", "\t", ""));
        assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(FormField::Description), Some(DESCRIPTION_REQUIRED));
        assert_eq!(errors.get(FormField::Price), Some(PRICE_REQUIRED));
    }

    #[test]
    fn test_price_rules() {
        for bad in ["0", "0,00", "-5", "abc", ",", "-0,01", "e5"] {
            let errors = validate(&form("n", "d", bad));
            assert_eq!(errors.get(FormField::Price), Some(PRICE_NOT_POSITIVE), "{bad}");
        }
        for good in ["10", "19,90", "0.5", " 3,5 ", "12abc", "1e2", ",5"] {
            assert!(!validate(&form("n", "d", good)).contains(FormField::Price), "{good}");
        }
    }

    #[test]
    fn test_parse_price_prefix() {
        assert_eq!(parse_price("19,90"), Some(19.9));
        assert_eq!(parse_price("12abc"), Some(12.0));
        assert_eq!(parse_price("1,5,7"), Some(1.5));
        assert_eq!(parse_price("2e"), Some(2.0));
        assert_eq!(parse_price("1.5e-1x"), Some(0.15));
        assert_eq!(parse_price("R$ 10"), None);
        assert_eq!(parse_price("-"), None);
    }

    #[test]
    fn test_huge_price_is_rejected() {
        let errors = validate(&form("n", "d", "1e400"));
        assert!(errors.contains(FormField::Price));
    }

    #[test]
    fn test_format_price_input() {
        assert_eq!(format_price_input(19.9), "19,9");
        assert_eq!(format_price_input(2599.99), "2599,99");
        assert_eq!(format_price_input(10.0), "10");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(2599.99), "R$ 2.599,99");
        assert_eq!(format_brl(599.5), "R$ 599,50");
        assert_eq!(format_brl(1234567.0), "R$ 1.234.567,00");
        assert_eq!(format_brl(0.1), "R$ 0,10");
    }

    #[test]
    fn test_clear_single_field() {
        let mut errors = validate(&form("", "", ""));
        assert!(errors.clear(FormField::Name));
        assert!(!errors.clear(FormField::Name));
        assert_eq!(errors.len(), 2);
    }
}
