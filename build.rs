use vergen_gitcl::{Emitter, GitclBuilder};

pub fn main() {
    println!("cargo:rerun-if-changed=migrations");

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|gitcl| Emitter::default().add_instructions(&gitcl)?.emit());

    // release tarballs and container builds have no git checkout to ask
    if emitted.is_err() {
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
