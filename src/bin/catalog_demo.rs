//! 商品目录演示程序
//! 在临时目录的文件存储上走一遍新建、校验失败、编辑和删除流程

use product_catalog::app::catalog::{
    FieldEdit, ProductFormData, ProductRepository, Shell, SubmitOutcome,
};
use product_catalog::app::catalog::view::Page;
use product_catalog::infrastructure::storage::{FileStore, KeyValueStore};

fn print_products<S: KeyValueStore>(shell: &Shell<S>) {
    for (i, product) in shell.products().iter().enumerate() {
        println!("   {}. [{}] {} - {}", i + 1, product.id, product.name, product.price);
    }
}

fn fill<S: KeyValueStore>(shell: &mut Shell<S>, data: ProductFormData) {
    for edit in data.into_edits() {
        shell.edit_field(edit);
    }
}

fn main() -> anyhow::Result<()> {
    println!("=== 商品目录演示 ===");
    println!();

    let data_dir = std::env::temp_dir().join(format!("catalog-demo-{}", uuid::Uuid::new_v4()));
    let store = FileStore::open(&data_dir)?;
    println!("存储目录: {}", data_dir.display());

    let mut shell = Shell::new(ProductRepository::new(store));
    println!("1. 首次启动，载入示例商品:");
    print_products(&shell);
    println!();

    println!("2. 提交缺少名称的表单:");
    shell.request_create();
    fill(&mut shell, ProductFormData::new("", "x", "10"));
    if let SubmitOutcome::Rejected(errors) = shell.submit() {
        for (field, message) in errors.iter() {
            println!("   {:?}: {}", field, message);
        }
    }
    println!("   当前状态: {:?}", shell.state());
    println!();

    println!("3. 修正后提交:");
    fill(
        &mut shell,
        ProductFormData::new("Caneca", "Caneca de cerâmica", "19,90"),
    );
    let created = match shell.submit() {
        SubmitOutcome::Created(product) => product,
        other => anyhow::bail!("意外的提交结果: {:?}", other),
    };
    print_products(&shell);
    println!();

    println!("4. 编辑价格:");
    shell.request_edit(&created.id);
    shell.edit_field(FieldEdit::Price("24,50".to_string()));
    shell.submit();
    print_products(&shell);
    println!();

    println!("5. 删除新商品和一个不存在的 id:");
    shell.request_delete(&created.id);
    shell.request_delete("does-not-exist");
    print_products(&shell);
    println!();

    println!("6. 重新打开存储:");
    let reopened = Shell::new(ProductRepository::new(FileStore::open(&data_dir)?));
    println!("{}", serde_json::to_string_pretty(&Page::render(&reopened))?);

    std::fs::remove_dir_all(&data_dir)?;
    println!();
    println!("✅ 演示完成");
    Ok(())
}
