//! Generator commands: module skeletons, migrations, seeders, error types.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_modkit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modkit"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to execute modkit")
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_modkit(dir, args);
    assert!(
        output.status.success(),
        "modkit {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modkit.toml"), "env = \"local\"\n").unwrap();
    dir
}

fn sql_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("sql"))
        .collect();
    files.sort();
    files
}

#[test]
fn new_module_scaffolds_the_skeleton() {
    let dir = project();
    run_ok(
        dir.path(),
        &["new", "blog_posts", "--priority", "3", "--core"],
    );

    let module_dir = dir.path().join("modules").join("BlogPosts");
    let manifest = fs::read_to_string(module_dir.join("module.toml")).unwrap();
    assert!(manifest.contains("name = \"BlogPosts\""));
    assert!(manifest.contains("priority = 3"));
    assert!(manifest.contains("core = true"));
    assert!(module_dir.join("src/lib.rs").exists());
    assert!(module_dir.join("database/migrations").is_dir());
    assert!(module_dir.join("database/seeders").is_dir());
    assert!(module_dir.join("src/errors").is_dir());

    // Discoverable, and disabled until enabled explicitly.
    let out = run_ok(dir.path(), &["list"]);
    assert!(out.contains("BlogPosts"));
    assert!(out.contains("disabled"));
}

#[test]
fn new_module_refuses_duplicates_without_force() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    let output = run_modkit(dir.path(), &["new", "Blog"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
}

#[test]
fn make_migration_create_renders_the_table() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    run_ok(
        dir.path(),
        &[
            "make",
            "migration",
            "create_posts_table",
            "-m",
            "Blog",
            "--fields",
            "title:string, body:text:nullable, views:integer:default(0)",
        ],
    );

    let migrations = dir.path().join("modules/Blog/database/migrations");
    let files = sql_files(&migrations);
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with('m'));
    assert!(name.ends_with("_create_posts_table.sql"));

    let contents = fs::read_to_string(&files[0]).unwrap();
    assert!(contents.contains("-- modkit:up"));
    assert!(contents.contains("CREATE TABLE posts ("));
    assert!(contents.contains("title TEXT NOT NULL,"));
    assert!(contents.contains("body TEXT,"));
    assert!(contents.contains("views INTEGER NOT NULL DEFAULT 0,"));
    assert!(contents.contains("-- modkit:down"));
    assert!(contents.contains("DROP TABLE IF EXISTS posts;"));
}

#[test]
fn make_migration_add_renders_alters() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    run_ok(
        dir.path(),
        &[
            "make",
            "migration",
            "add_avatar_to_users_table",
            "-m",
            "Blog",
            "--fields",
            "avatar:string:nullable",
        ],
    );

    let files = sql_files(&dir.path().join("modules/Blog/database/migrations"));
    let contents = fs::read_to_string(&files[0]).unwrap();
    assert!(contents.contains("ALTER TABLE users ADD COLUMN avatar TEXT;"));
    assert!(contents.contains("ALTER TABLE users DROP COLUMN avatar;"));
}

#[test]
fn make_migration_plain_flag_wins() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    run_ok(
        dir.path(),
        &[
            "make",
            "migration",
            "create_posts_table",
            "-m",
            "Blog",
            "--plain",
        ],
    );
    let files = sql_files(&dir.path().join("modules/Blog/database/migrations"));
    let contents = fs::read_to_string(&files[0]).unwrap();
    assert!(!contents.contains("CREATE TABLE"));
    assert!(contents.contains("-- modkit:up"));
    assert!(contents.contains("-- modkit:down"));
}

#[test]
fn make_migration_for_unknown_module_fails() {
    let dir = project();
    let output = run_modkit(
        dir.path(),
        &["make", "migration", "create_posts_table", "-m", "Ghost"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("module not found"));
}

#[test]
fn make_seeder_and_master_seeder() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    run_ok(dir.path(), &["make", "seeder", "demo_posts", "-m", "Blog"]);
    run_ok(
        dir.path(),
        &["make", "seeder", "whatever", "-m", "Blog", "--master"],
    );

    let seeders = dir.path().join("modules/Blog/database/seeders");
    assert!(seeders.join("master.sql").exists());
    let named: Vec<PathBuf> = sql_files(&seeders)
        .into_iter()
        .filter(|p| p.file_name().unwrap() != "master.sql")
        .collect();
    assert_eq!(named.len(), 1);
    let contents = fs::read_to_string(&named[0]).unwrap();
    assert!(contents.contains("DemoPosts"));
    assert!(contents.contains("Blog"));
}

#[test]
fn make_error_renders_a_thiserror_skeleton() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    run_ok(
        dir.path(),
        &["make", "error", "post_not_found", "-m", "Blog"],
    );

    let path = dir.path().join("modules/Blog/src/errors/post_not_found.rs");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("pub enum PostNotFound"));
    assert!(contents.contains("thiserror"));
    assert!(contents.contains("Blog"));
}

#[test]
fn generators_refuse_to_overwrite_without_force() {
    let dir = project();
    run_ok(dir.path(), &["new", "Blog"]);
    run_ok(dir.path(), &["make", "error", "boom", "-m", "Blog"]);

    let output = run_modkit(dir.path(), &["make", "error", "boom", "-m", "Blog"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

    run_ok(
        dir.path(),
        &["make", "error", "boom", "-m", "Blog", "--force"],
    );
}
