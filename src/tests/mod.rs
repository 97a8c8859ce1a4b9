use crate::{
    ErrorDetail,
    card::CardVariant,
    catalog::Catalog,
    config::StorefrontConfig,
    grid::{ArrangedGrid, Grid},
    translation,
};

const CONFIG: &str = "src/tests/storefront/config.yaml";
const PRODUCTS: &str = "src/tests/storefront/products.yaml";
const LEGACY: &str = "src/tests/storefront/legacy.json";

async fn arrange(
    config: &StorefrontConfig,
    catalog: &Catalog,
    name: &str,
    lang: Option<&str>,
) -> ArrangedGrid {
    let grid_config = &config.grids[name];
    Grid::new(name, grid_config, config)
        .arrange(&catalog.products, lang)
        .await
}

#[tokio::test]
async fn test_zoommer_grid() {
    let config = StorefrontConfig::load(CONFIG).await.unwrap();
    let catalog = Catalog::load(PRODUCTS).await.unwrap();
    assert_eq!(catalog.products.len(), 6);

    let grid = arrange(&config, &catalog, "zoommer", None).await;
    assert_eq!(grid.name, "zoommer");
    assert_eq!(grid.columns, 4);
    assert_eq!(
        grid.cards
            .iter()
            .map(|arranged| arranged.card.id.as_str())
            .collect::<Vec<_>>(),
        vec!["prod-1", "prod-2", "prod-3", "prod-4", "prod-5"]
    );
    assert_eq!(grid.rows().map(<[_]>::len).collect::<Vec<_>>(), vec![4, 1]);

    let first = &grid.cards[0];
    assert!(first.warnings.is_empty());
    assert_eq!(first.card.variant, CardVariant::Zoommer);
    assert_eq!(first.card.theme_color, "#CC6A4C");
    assert_eq!(first.card.title, "RTX 5060 Ti 8GB");
    assert_eq!(first.card.href, "/en/product/rtx-5060-ti-8gb");
    assert!(
        first
            .card
            .image_url
            .as_deref()
            .is_some_and(|url| url.contains("afee037f"))
    );
    assert_eq!(first.card.image_urls.len(), 2);
    assert!(!first.card.unoptimized_image);
    assert_eq!(first.card.price, "1,699.00 ₾");
    assert_eq!(first.card.original_price.as_deref(), Some("1,899.00 ₾"));
    assert_eq!(first.card.discount_percent, 11);
    assert!(first.card.is_new_arrival);

    let s3 = &grid.cards[1].card;
    assert!(s3.unoptimized_image);
    assert_eq!(s3.price, "2,199.00 ₾");
    assert_eq!(s3.original_price, None);
    assert_eq!(s3.discount_percent, 0);

    let coming_soon = &grid.cards[2].card;
    assert_eq!(coming_soon.image_url.as_deref(), Some("/gpu/rx-7800-xt.png"));
    assert!(coming_soon.in_stock);
    assert!(!coming_soon.can_add_to_cart);

    let out_of_stock = &grid.cards[3];
    assert!(!out_of_stock.card.in_stock);
    assert_eq!(
        out_of_stock.warnings,
        vec!["prod-4: image host not allowed: https://example.com/gtx-1660-super.jpeg".to_string()]
    );

    let no_image = &grid.cards[4];
    assert_eq!(no_image.card.image_url, None);
    assert_eq!(no_image.card.discount_percent, 13);
    assert_eq!(no_image.warnings, vec!["prod-5: no image".to_string()]);
    assert_eq!(grid.warning_count(), 2);
}

#[tokio::test]
async fn test_localized_grid() {
    let config = StorefrontConfig::load(CONFIG).await.unwrap();
    let catalog = Catalog::load(PRODUCTS).await.unwrap();

    let grid = arrange(&config, &catalog, "alta-horizontal", None).await;
    assert_eq!(grid.columns, 1);
    assert_eq!(grid.rows().count(), 5);
    assert_eq!(grid.cards[0].card.lang, "ka");
    assert_eq!(grid.cards[0].card.title, "RTX 5060 Ti 8GB ვიდეო ბარათი");
    assert_eq!(grid.cards[0].card.href, "/ka/product/rtx-5060-ti-8gb");
    assert_eq!(grid.cards[1].card.title, "RTX 5060 Ti 16GB");

    let english = arrange(&config, &catalog, "alta-horizontal", Some("en")).await;
    assert_eq!(english.cards[0].card.title, "RTX 5060 Ti 8GB");
    assert_eq!(english.cards[0].card.href, "/en/product/rtx-5060-ti-8gb");

    let name = translation::to_localized_text(catalog.products[0].translations.as_ref(), "Name");
    assert_eq!(name.en(), "RTX 5060 Ti 8GB");
    assert_eq!(name.get("ka"), Some("RTX 5060 Ti 8GB ვიდეო ბარათი"));
}

#[tokio::test]
async fn test_legacy_catalog() {
    let catalog = Catalog::load(LEGACY).await.unwrap();
    let product = catalog.get("legacy-1").unwrap();
    assert_eq!(
        product.image_urls(),
        vec!["site/legacy-front.jpeg", "site/legacy-back.jpeg"]
    );
    assert_eq!(product.cover_image_url(), Some("site/legacy-front.jpeg"));
    assert_eq!(product.category.cover_image_url(), Some("/categories/gpus.png"));

    let config = StorefrontConfig {
        image_base_url: Some("https://cdn.example.com/media/".parse().unwrap()),
        ..Default::default()
    };
    let grid = arrange(&config, &catalog, "classic", None).await;
    let card = &grid.cards[0];
    assert!(card.warnings.is_empty());
    assert_eq!(card.card.title, "Legacy Card");
    assert_eq!(card.card.href, "/en/product/legacy-1");
    assert_eq!(
        card.card.image_urls,
        vec![
            "https://cdn.example.com/media/site/legacy-front.jpeg".to_string(),
            "https://cdn.example.com/media/site/legacy-back.jpeg".to_string(),
        ]
    );
    assert_eq!(card.card.price, "1,250.50 ₾");

    let name = translation::to_localized_text(product.translations.as_ref(), "Name");
    assert_eq!(name.en(), "");
    assert_eq!(name.get("EN"), Some("Shouting Card"));
}

#[tokio::test]
async fn test_output_shape() {
    let config = StorefrontConfig::load(CONFIG).await.unwrap();
    let catalog = Catalog::load(PRODUCTS).await.unwrap();
    let grid = arrange(&config, &catalog, "zoommer", None).await;
    let json = serde_json::to_value(&grid).unwrap();
    let first = &json["cards"][0];
    assert_eq!(first["id"], "prod-1");
    assert_eq!(first["variant"], "zoommer");
    assert_eq!(first["size"], "compact");
    assert_eq!(first["discountPercent"], 11);
    assert!(first.get("warnings").is_none());
    assert_eq!(json["cards"][4]["warnings"][0], "prod-5: no image");
}

#[tokio::test]
async fn test_load_errors() {
    let err = Catalog::load("src/tests/storefront/missing.yaml")
        .await
        .unwrap_err();
    assert!(matches!(*err.detail, ErrorDetail::ReadDocument(_)));
    assert!(err.to_string().starts_with("src/tests/storefront/missing.yaml: "));

    let err = StorefrontConfig::load(PRODUCTS).await.unwrap_err();
    assert!(matches!(*err.detail, ErrorDetail::ParseYaml(_)));
}
