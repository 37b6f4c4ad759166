use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn grille() -> Command {
    let mut cmd = cargo_bin_cmd!("grille");
    cmd.env_remove("GRILLE_CONFIG");
    cmd
}

#[allow(dead_code)]
pub const SMALL_RUBRIC: &str = r#"Categorie,Critere,Description,Bas,Moyen,Haut,Points
"1. Oral (50%)","Clarté","Expose clair, structuré","Confus","Correct","Limpide",10
"1. Oral (50%)","Temps","Gestion du temps","Dépassé","Juste","Maîtrisé",5
trop,court
"2. Code (50%)","Tests","Tests automatisés","Aucun","Quelques","Complets",abc
"#;

#[allow(dead_code)]
pub fn write_rubric(dir: &Path) -> PathBuf {
    let path = dir.join("rubric.csv");
    fs::write(&path, SMALL_RUBRIC).expect("write rubric fixture");
    path
}
