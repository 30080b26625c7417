use mushak_map::{
    MappingRepository, StoredMappingConfig, load_mapping_file, save_mapping_file,
};
use mushak_model::{FieldMapping, MappingConfig, TaxField};

fn sample_config() -> MappingConfig {
    MappingConfig {
        max_distance: Some(2),
        mappings: vec![
            FieldMapping {
                field: TaxField::HsCode,
                header: "HS Code".to_string(),
            },
            FieldMapping {
                field: TaxField::Tti,
                header: "TTII".to_string(),
            },
        ],
    }
}

#[test]
fn repository_save_and_load() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = MappingRepository::new(dir.path().join("profiles")).expect("create repo");

    let path = repo.save("acme traders", &sample_config()).expect("save mapping");
    assert!(path.ends_with("ACME_TRADERS.json"));
    assert!(repo.exists("Acme Traders"));

    let loaded = repo
        .load("acme traders")
        .expect("load mapping")
        .expect("profile exists");
    assert_eq!(loaded, sample_config());

    let stored = repo
        .load_stored("acme traders")
        .expect("load stored")
        .expect("profile exists");
    assert_eq!(stored.version, "1.0");
    assert!(stored.saved_at.is_some());
}

#[test]
fn repository_missing_profile_is_none() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");
    assert!(repo.load("nobody").expect("load").is_none());
    assert!(!repo.delete("nobody").expect("delete"));
}

#[test]
fn repository_lists_and_deletes_profiles() {
    let dir = tempfile::tempdir().expect("temp dir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");

    repo.save_stored(
        &StoredMappingConfig::new("zeta", sample_config()).with_description("monthly upload"),
    )
    .expect("save zeta");
    repo.save("alpha", &MappingConfig::default()).expect("save alpha");
    std::fs::write(dir.path().join("garbage.json"), "not json").expect("write garbage");

    let listed = repo.list().expect("list");
    let names: Vec<&str> = listed.iter().map(|m| m.profile.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    assert_eq!(listed[1].mapping_count, 2);

    assert!(repo.delete("zeta").expect("delete"));
    assert!(!repo.exists("zeta"));
}

#[test]
fn standalone_mapping_file_round_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("mapping.json");
    save_mapping_file(&path, &sample_config()).expect("save file");
    assert_eq!(load_mapping_file(&path).expect("load file"), sample_config());

    std::fs::write(&path, "{").expect("corrupt file");
    assert!(load_mapping_file(&path).is_err());
}
