use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// (file name, download url)
const FACES: [(&str, &str); 6] = [
    (
        "NotoSans-Regular.ttf",
        "https://notofonts.github.io/latin-greek-cyrillic/fonts/NotoSans/hinted/ttf/NotoSans-Regular.ttf",
    ),
    (
        "NotoSans-Bold.ttf",
        "https://notofonts.github.io/latin-greek-cyrillic/fonts/NotoSans/hinted/ttf/NotoSans-Bold.ttf",
    ),
    (
        "NotoSansDevanagari-Regular.ttf",
        "https://notofonts.github.io/devanagari/fonts/NotoSansDevanagari/hinted/ttf/NotoSansDevanagari-Regular.ttf",
    ),
    (
        "NotoSansDevanagari-Bold.ttf",
        "https://notofonts.github.io/devanagari/fonts/NotoSansDevanagari/hinted/ttf/NotoSansDevanagari-Bold.ttf",
    ),
    (
        "NotoSansGujarati-Regular.ttf",
        "https://notofonts.github.io/gujarati/fonts/NotoSansGujarati/hinted/ttf/NotoSansGujarati-Regular.ttf",
    ),
    (
        "NotoSansGujarati-Bold.ttf",
        "https://notofonts.github.io/gujarati/fonts/NotoSansGujarati/hinted/ttf/NotoSansGujarati-Bold.ttf",
    ),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FONTS_DIR");
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let local = env::var("FONTS_DIR").ok().map(PathBuf::from);

    for (file, url) in FACES {
        let target = out_dir.join(file);
        if target.exists() && fs::metadata(&target).map(|m| m.len() > 0).unwrap_or(false) {
            continue;
        }
        if let Some(dir) = &local
            && fs::copy(dir.join(file), &target).is_ok()
        {
            continue;
        }
        if !download(url, &target) {
            // An empty face is skipped at runtime and the renderer falls back
            // to system fonts.
            println!("cargo:warning=could not fetch {file}; set FONTS_DIR to a directory holding it");
            fs::write(&target, []).unwrap();
        }
    }
}

fn download(url: &str, target: &Path) -> bool {
    let dest = target.to_str().unwrap();
    let curl = Command::new("curl").args(["-L", "-f", "-s", "-o", dest, url]).status();
    if let Ok(st) = curl
        && st.success()
    {
        return true;
    }
    let wget = Command::new("wget").args(["-q", "-O", dest, url]).status();
    matches!(wget, Ok(st) if st.success())
}
