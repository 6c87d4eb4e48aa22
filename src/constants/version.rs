use semver::Version;

pub fn get_version() -> String {
    let semver = env!("CARGO_PKG_VERSION").parse::<Version>();
    let sha = env!("VERGEN_GIT_SHA");

    match semver {
        Ok(semver) if sha != "unknown" && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            format!("{semver} [{sha}]")
        }
        Ok(semver) => semver.to_string(),
        Err(_) => {
            tracing::warn!("couldn't parse a semver out of Cargo.toml? defaulting to 0.0.0-unknown.");
            String::from("0.0.0-unknown")
        }
    }
}
