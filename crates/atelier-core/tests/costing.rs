use atelier_core::catalog::{MaterialCatalog, ProductCatalog};
use atelier_core::cost::{CostEngine, CostWarning};
use atelier_core::error::CostError;
use atelier_core::labor::LaborKind;
use atelier_core::money::Money;
use atelier_core::range::parse_bulk_skus;
use atelier_core::settings::{EngineConfig, GlobalSettings};
use atelier_core::sku::analyze_sku;
use atelier_core::supplier::Verdict;
use atelier_core::types::*;
use atelier_core::variant::estimate_all_variants;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

fn settings() -> GlobalSettings {
    GlobalSettings::new(Money::new(dec!(0.82)), dec!(10))
}

fn materials() -> MaterialCatalog {
    let json = r#"[
        { "id": "JUMP-RING", "name": "Jump ring", "material_type": "component",
          "cost_per_unit": "0.05", "unit": "pc" },
        { "id": "STN-KR", "name": "Carnelian 6mm", "material_type": "stone",
          "cost_per_unit": "0.40", "unit": "pc", "variant_code": "KR" },
        { "id": "STN-TG", "name": "Tiger's Eye 6mm", "material_type": "stone",
          "cost_per_unit": "1.00", "unit": "pc", "variant_code": "TG" }
    ]"#;
    MaterialCatalog::new(serde_json::from_str(json).unwrap())
}

/// PN100 is bought in at 5.50; XR2020 is cast in-house around it.
fn bracelet_catalog() -> ProductCatalog {
    let mut pendant = Product::new("PN100", dec!(1));
    pendant.production = ProductionMode::Imported;
    pendant.supplier_cost = Some(Money::from_cents(550));

    let mut bracelet = Product::new("XR2020", dec!(2));
    bracelet.recipe = vec![
        RecipeItem::component("PN100", dec!(1)),
        RecipeItem::raw("JUMP-RING", dec!(1)),
    ];

    ProductCatalog::new(vec![pendant, bracelet])
}

fn chain_with_cycle(skus: &[&str]) -> ProductCatalog {
    skus.iter()
        .enumerate()
        .map(|(i, sku)| {
            let mut p = Product::new(sku, dec!(1));
            let next = skus[(i + 1) % skus.len()];
            p.recipe = vec![RecipeItem::component(next, dec!(1))];
            p
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Nested recipes
// ---------------------------------------------------------------------------

#[test]
fn test_nested_component_rolls_up() {
    let products = bracelet_catalog();
    let materials = materials();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);

    let pendant = engine.resolve(products.get("PN100").unwrap()).unwrap();
    assert_eq!(pendant.total, Money::from_cents(550));

    let bracelet = engine.resolve(products.get("XR2020").unwrap()).unwrap();
    // metal 2 × 0.82 × 1.10 = 1.804 → 1.80
    assert_eq!(bracelet.metal, Money::from_cents(180));
    assert_eq!(bracelet.materials, Money::from_cents(5));
    assert_eq!(bracelet.components, Money::from_cents(550));
    // casting 2 × 0.20 + technician 2 × 1.30
    assert_eq!(bracelet.labor, Money::from_cents(300));
    assert_eq!(bracelet.total, Money::from_cents(1035));

    assert!(bracelet.total >= pendant.total + Money::from_cents(5) + bracelet.labor);
    assert!(bracelet.warnings.is_empty());
}

#[test]
fn test_resolution_is_deterministic() {
    let products = bracelet_catalog();
    let materials = materials();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);
    let bracelet = products.get("XR2020").unwrap();

    let first = engine.resolve(bracelet).unwrap();
    let second = engine.resolve(bracelet).unwrap();
    assert_eq!(first, second);

    // Writing back and resolving again is a fixed point.
    let saved = first.apply_to(bracelet);
    assert_eq!(engine.resolve(&saved).unwrap().total, saved.active_price);
}

#[test]
fn test_component_quantity_multiplies() {
    let mut products: Vec<Product> = bracelet_catalog().iter().cloned().collect();
    products[1].recipe = vec![RecipeItem::component("pn100", dec!(3))];
    let products = ProductCatalog::new(products);
    let materials = materials();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);

    let bracelet = engine.resolve(products.get("XR2020").unwrap()).unwrap();
    assert_eq!(bracelet.components, Money::from_cents(1650));
    assert_eq!(bracelet.component_lines[0].unit_cost, Money::from_cents(550));
}

// ---------------------------------------------------------------------------
// Cycles
// ---------------------------------------------------------------------------

#[test]
fn test_direct_cycle() {
    let products = chain_with_cycle(&["XR1", "PN1"]);
    let materials = MaterialCatalog::default();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);

    let err = engine.resolve(products.get("XR1").unwrap()).unwrap_err();
    assert_eq!(
        err,
        CostError::CircularRecipe {
            sku: "XR1".to_string(),
            path: vec!["XR1".into(), "PN1".into(), "XR1".into()],
        }
    );
    assert_eq!(err.to_string(), "Circular recipe detected at XR1: XR1 -> PN1 -> XR1");
}

#[test]
fn test_indirect_cycle_reported_from_any_entry() {
    let products = chain_with_cycle(&["RN1", "PN2", "MN3"]);
    let materials = MaterialCatalog::default();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);

    let err = engine.resolve(products.get("PN2").unwrap()).unwrap_err();
    assert_eq!(err.sku(), Some("PN2"));

    let outcomes = engine.reprice_catalog();
    assert!(outcomes.iter().all(|o| o.result.is_err()));
}

#[test]
fn test_cycle_below_an_acyclic_root() {
    let mut products: Vec<Product> = chain_with_cycle(&["PN1", "PN2"]).iter().cloned().collect();
    let mut root = Product::new("XR9", dec!(1));
    root.recipe = vec![RecipeItem::component("PN1", dec!(1))];
    products.push(root.clone());
    let products = ProductCatalog::new(products);
    let materials = MaterialCatalog::default();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);

    match engine.resolve(&root) {
        Err(CostError::CircularRecipe { sku, path }) => {
            assert_eq!(sku, "PN1");
            assert_eq!(path, vec!["XR9", "PN1", "PN2", "PN1"]);
        }
        other => panic!("expected a circular recipe, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Variants and supplier audit
// ---------------------------------------------------------------------------

#[test]
fn test_variant_estimates_from_master() {
    let mut master = Product::new("XR3030", dec!(10));
    master.recipe = vec![RecipeItem::raw("STN-KR", dec!(2))];
    master.labor.pin(LaborKind::Technician, Money::from_cents(400));
    master.variants = ["PKR", "TG", "XTG", "QQ"]
        .iter()
        .map(|suffix| ProductVariant {
            suffix: suffix.to_string(),
            description: String::new(),
            active_price: Money::zero(),
            selling_price: Money::zero(),
        })
        .collect();

    let products = ProductCatalog::new(vec![master.clone()]);
    let materials = materials();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);
    let cost = engine.resolve(&master).unwrap();

    let estimates = estimate_all_variants(&engine, &master, &cost);
    let totals: Vec<Money> = estimates.iter().map(|e| e.total).collect();
    assert_eq!(
        totals,
        vec![
            cost.total,
            // 2 × (1.00 − 0.40)
            cost.total + Money::from_cents(120),
            // + plating 10g × 0.35
            cost.total + Money::from_cents(120) + Money::from_cents(350),
            cost.total,
        ]
    );
    assert_eq!(estimates[2].description, "Gold Plated - Tiger's Eye");
    assert!(matches!(
        estimates[3].warnings.as_slice(),
        [CostWarning::UnrecognizedSuffix { .. }]
    ));
}

#[test]
fn test_supplier_audit() {
    let mut fair = Product::new("PN7", dec!(10));
    fair.production = ProductionMode::Imported;
    let products = ProductCatalog::new(vec![fair.clone()]);
    let materials = materials();
    let (settings, config) = (settings(), EngineConfig::default());
    let engine = CostEngine::new(&products, &materials, &settings, &config);

    // In-house counterfactual: metal 9.02 + casting 2.00 + technician 5.00
    let theoretical = Money::from_cents(1602);

    fair.supplier_cost = Some(theoretical);
    let analysis = engine.resolve(&fair).unwrap().supplier_analysis.unwrap();
    assert_eq!(analysis.theoretical_make_cost, theoretical);
    assert!(analysis.premium_percent.is_zero());
    assert_eq!(analysis.verdict, Verdict::Excellent);

    fair.supplier_cost = Some(Money::from_cents(4005));
    let analysis = engine.resolve(&fair).unwrap().supplier_analysis.unwrap();
    assert_eq!(analysis.premium, Money::from_cents(2403));
    assert_eq!(analysis.premium_percent, dec!(150));
    assert_eq!(analysis.verdict, Verdict::Overpriced);
}

// ---------------------------------------------------------------------------
// SKU side
// ---------------------------------------------------------------------------

#[test]
fn test_bulk_paste_feeds_analyzer() {
    let skus = parse_bulk_skus("da1005p, DA1005-DA1006\nXR2020XTG", &EngineConfig::default().sku);
    assert_eq!(skus, vec!["DA1005P", "DA1005", "DA1006", "XR2020XTG"]);

    let masters: Vec<String> = skus
        .iter()
        .map(|s| analyze_sku(s, None).master_sku)
        .collect();
    assert_eq!(masters, vec!["DA1005", "DA1005", "DA1006", "XR2020"]);
}
