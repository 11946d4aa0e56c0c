use super::*;

#[test]
fn builtin_catalog_has_three_distinct_species() {
    let c = Catalog::builtin();
    assert_eq!(c.species().len(), 3);
    assert_eq!(c.first().id, "glyptodon");
    assert_eq!(c.get("mastodon").unwrap().base_color.to_hex(), "#2980B9");
    assert!(c.get("trex").is_err());

    Catalog::new(c.species().to_vec()).unwrap();
}

#[test]
fn new_rejects_empty_and_duplicates() {
    assert!(Catalog::new(vec![]).is_err());

    let one = Catalog::builtin().first().clone();
    assert!(Catalog::new(vec![one.clone(), one.clone()]).is_err());

    let blank = Species {
        id: "  ".to_string(),
        ..one
    };
    assert!(Catalog::new(vec![blank]).is_err());
}

#[test]
fn json_is_a_plain_array() {
    let json = serde_json::to_value(Catalog::builtin()).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[2]["scientific_name"], "Smilodon populator");
    assert_eq!(arr[0]["base_color"], "#27AE60");
}
