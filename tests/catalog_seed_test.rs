use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_seed_catalog_from_csv() {
    let mut seed = NamedTempFile::new().unwrap();
    writeln!(seed, "category, id, name, price, stock, attribute").unwrap();
    writeln!(seed, "electronics, E90, Headphones, 59.99, 3, Sony").unwrap();
    writeln!(seed, "clothing, C90, Beanie, 9.99, 0, S").unwrap();

    assert_cmd::Command::new(cargo_bin!("storekeep"))
        .arg("--catalog")
        .arg(seed.path())
        .write_stdin("Ada\n1\n11\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ID: C90 | Clothing: Beanie (Size: S) - $9.99 | Stock: 0 [SOLD OUT]",
        ))
        .stdout(predicate::str::contains(
            "ID: E90 | Electronics: Headphones (Brand: Sony) - $59.99 | Stock: 3",
        ))
        // the built-in demo products are replaced by the seed file
        .stdout(predicate::str::contains("Smartphone").not());
}

#[test]
fn test_invalid_seed_row_aborts_startup() {
    let mut seed = NamedTempFile::new().unwrap();
    writeln!(seed, "category, id, name, price, stock, attribute").unwrap();
    writeln!(seed, "clothing, C90, Beanie, -9.99, 5, S").unwrap();

    assert_cmd::Command::new(cargo_bin!("storekeep"))
        .arg("--catalog")
        .arg(seed.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("price must be non-negative"));
}

#[test]
fn test_duplicate_seed_id_aborts_startup() {
    let mut seed = NamedTempFile::new().unwrap();
    writeln!(seed, "category, id, name, price, stock, attribute").unwrap();
    writeln!(seed, "clothing, C90, Beanie, 9.99, 5, S").unwrap();
    writeln!(seed, "clothing, C90, Other Beanie, 19.99, 5, M").unwrap();

    assert_cmd::Command::new(cargo_bin!("storekeep"))
        .arg("--catalog")
        .arg(seed.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
