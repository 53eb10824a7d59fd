use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // OUT_DIR is target/<profile>/build/backend-xxx/out, the binary lands in target/<profile>
    let (Ok(out_dir), Ok(profile)) = (env::var("OUT_DIR"), env::var("PROFILE")) else {
        println!("cargo:warning=OUT_DIR or PROFILE not set, config.toml not copied");
        return;
    };
    let Some(target_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");
    let dest_config = target_dir.join("config.toml");

    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, using embedded default",
            source_config
        );
        return;
    }

    if let Err(e) = fs::copy(&source_config, &dest_config) {
        panic!("Failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}
