use std::io::Write;

use game_content::ConfigLoader;

#[test]
fn loads_config_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_floors = 10").unwrap();
    writeln!(file, "party_size = 2").unwrap();
    writeln!(file, "room_choices_per_floor = 3").unwrap();

    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.max_floors, 10);
    assert_eq!(config.party_size, 2);
    assert_eq!(config.room_choices_per_floor, 3);
    assert!(config.is_milestone(5));
    assert!(config.is_milestone(10));
}

#[test]
fn missing_file_reports_path() {
    let err = ConfigLoader::load(std::path::Path::new("/nonexistent/dungeon.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/dungeon.toml"));
}
