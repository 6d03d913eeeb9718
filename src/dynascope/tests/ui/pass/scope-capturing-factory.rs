use std::sync::Arc;

use dynascope::prelude::*;

pub struct Config {
    pub name: String,
}

pub struct Service {
    pub config: Arc<Config>,
}

fn main() {
    let root = Scope::new();
    let fallback = Arc::new(Config {
        name: String::from("fallback"),
    });

    root.set(Provider::computed(move |current: &Scope| {
        let config = current.get::<Config>().unwrap_or_else(|| Arc::clone(&fallback));
        Arc::new(Service { config })
    }));
    root.set(default_factory::<Vec<String>>());

    let child = root.child();
    let _: Result<Arc<Service>, ResolveError> = child.require::<Service>();
    let _: Option<Arc<Vec<String>>> = child.get();
}
