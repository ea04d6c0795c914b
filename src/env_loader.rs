use std::env;
use std::path::PathBuf;

fn fallback_dotenv_path(paktool_home: Option<PathBuf>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(home) = paktool_home {
        return Some(home.join(".env"));
    }
    Some(home_dir?.join(".paktool/.env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("PAKTOOL_HOME").map(PathBuf::from),
        dirs::home_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::fallback_dotenv_path;
    use std::path::PathBuf;

    #[test]
    fn fallback_prefers_paktool_home() {
        let got = fallback_dotenv_path(
            Some(PathBuf::from("/opt/paktool")),
            Some(PathBuf::from("/home/builder")),
        );
        assert_eq!(got, Some(PathBuf::from("/opt/paktool/.env")));
    }

    #[test]
    fn fallback_uses_home_when_paktool_home_unset() {
        let got = fallback_dotenv_path(None, Some(PathBuf::from("/home/builder")));
        assert_eq!(got, Some(PathBuf::from("/home/builder/.paktool/.env")));
    }

    #[test]
    fn no_home_means_no_fallback() {
        assert_eq!(fallback_dotenv_path(None, None), None);
    }
}
