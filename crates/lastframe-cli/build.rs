use std::env;
use std::fs;
use std::path::Path;

// Mirror `public/` next to the built binary so the default input and output
// paths, which are resolved relative to the executable, point somewhere real.
fn main() {
    println!("cargo:rerun-if-changed=public/");

    let source = Path::new("public");
    if !source.is_dir() {
        return;
    }

    let out_dir = env::var("OUT_DIR").unwrap();
    // OUT_DIR = target/<profile>/build/<pkg>-<hash>/out
    let profile_dir = Path::new(&out_dir).ancestors().nth(3).unwrap();
    let destination = profile_dir.join("public");

    fs::create_dir_all(&destination).unwrap();
    for entry in fs::read_dir(source).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            fs::copy(&path, destination.join(path.file_name().unwrap())).unwrap();
        }
    }
}
