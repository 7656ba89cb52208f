use std::fs;

use tempfile::TempDir;

use crate::integration::support::{generate, list_files, write_config};

const CONFIG: &str = "\
bin:
  size: [3000, 1k]
  number: 3
  pathdepth: 2
txt:
  size: 500
  number: 2
  base64: true
  extn: .log
";

#[test]
fn two_runs_produce_identical_trees() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "c.yaml", CONFIG);
    let first = temp.path().join("first");
    let second = temp.path().join("second");

    generate(vec![config.clone()], Some(first.clone()), 1, "text").unwrap();
    generate(vec![config], Some(second.clone()), 8, "text").unwrap();

    let first_files = list_files(&first);
    assert_eq!(first_files, list_files(&second));
    for (path, _) in &first_files {
        assert_eq!(
            fs::read(first.join(path)).unwrap(),
            fs::read(second.join(path)).unwrap(),
            "{}",
            path
        );
    }
}

#[test]
fn content_depends_only_on_relative_path() {
    let temp = TempDir::new().unwrap();
    let a = write_config(temp.path(), "a.yaml", "one:\n  size: 2k\n");
    let b = write_config(temp.path(), "b.yaml", "two:\n  size: 2k\n");
    let out_a = temp.path().join("a");
    let out_b = temp.path().join("b");

    generate(vec![a], Some(out_a.clone()), 1, "text").unwrap();
    generate(vec![b], Some(out_b.clone()), 1, "text").unwrap();

    let rel = "size_2k_files_1/size_2k_0000.dat";
    assert_eq!(
        fs::read(out_a.join("one").join(rel)).unwrap(),
        fs::read(out_b.join("two").join(rel)).unwrap()
    );
}

#[test]
fn distinct_files_get_distinct_content() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "c.yaml", "d:\n  size: 64\n  number: 2\n");
    let root = temp.path().join("out");
    generate(vec![config], Some(root.clone()), 1, "text").unwrap();

    let dir = root.join("d/size_64_files_2");
    assert_ne!(
        fs::read(dir.join("size_64_0000.dat")).unwrap(),
        fs::read(dir.join("size_64_0001.dat")).unwrap()
    );
}
