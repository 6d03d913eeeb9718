use std::sync::Arc;

use dynascope::prelude::*;

pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("{message}");
    }
}

fn main() {
    let scope = Scope::new();
    scope.set(Provider::<dyn Logger>::fixed(Arc::new(ConsoleLogger)));
    scope.set(factory(|_: &Scope| -> Arc<dyn Logger> { Arc::new(ConsoleLogger) }));

    let logger: Option<Arc<dyn Logger>> = scope.get::<dyn Logger>();
    if let Some(logger) = logger {
        logger.log("hello");
    }
}
