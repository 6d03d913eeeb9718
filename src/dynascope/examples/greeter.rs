use std::env;
use std::sync::Arc;

use dynascope::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let kind = env::args().nth(1).unwrap_or_else(|| String::from("english"));

    let root = Scope::new();
    root.set(Provider::fixed(Arc::new(AppName("greeter"))));
    root.set(Provider::<dyn Logger>::computed(|scope: &Scope| -> Arc<dyn Logger> {
        let app_name = scope.get::<AppName>().map_or("unknown", |name| name.0);
        Arc::new(ConsoleLogger { app_name })
    }));
    root.set(Provider::computed(App::build));

    if let Err(err) = SelectionRegistry::global().try_select::<dyn Greeter>(&root, &kind) {
        eprintln!("{err}");
        return;
    }

    let session = root.child();
    session.set(Provider::fixed(Arc::new(AppName("greeter/session"))));

    for scope in [&root, &session] {
        match scope.require::<App>() {
            Ok(app) => app.run(),
            Err(err) => eprintln!("{err}"),
        }
    }
}

struct AppName(&'static str);

trait Logger: Send + Sync + 'static {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    app_name: &'static str,
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[{}] {}", self.app_name, message);
    }
}

trait Greeter: Send + Sync + 'static {
    fn greet(&self);
}

struct EnglishGreeter {
    logger: Arc<dyn Logger>,
}

impl Greeter for EnglishGreeter {
    fn greet(&self) {
        self.logger.log("Hello World!");
    }
}

struct ChineseGreeter {
    logger: Arc<dyn Logger>,
}

impl Greeter for ChineseGreeter {
    fn greet(&self) {
        self.logger.log("你好世界!");
    }
}

export!(
    ENGLISH_GREETER,
    "english",
    Provider::<dyn Greeter>::computed(|scope: &Scope| -> Arc<dyn Greeter> {
        Arc::new(EnglishGreeter {
            logger: logger_of(scope),
        })
    })
);

export!(
    CHINESE_GREETER,
    "chinese",
    Provider::<dyn Greeter>::computed(|scope: &Scope| -> Arc<dyn Greeter> {
        Arc::new(ChineseGreeter {
            logger: logger_of(scope),
        })
    })
);

fn logger_of(scope: &Scope) -> Arc<dyn Logger> {
    match scope.get::<dyn Logger>() {
        Some(logger) => logger,
        None => Arc::new(ConsoleLogger { app_name: "orphan" }),
    }
}

struct App {
    logger: Arc<dyn Logger>,
    greeter: Option<Arc<dyn Greeter>>,
}

impl App {
    fn build(scope: &Scope) -> Arc<Self> {
        Arc::new(Self {
            logger: logger_of(scope),
            greeter: scope.get::<dyn Greeter>(),
        })
    }

    fn run(&self) {
        self.logger.log("Greeting from dynascope managed objects:");
        match &self.greeter {
            Some(greeter) => greeter.greet(),
            None => self.logger.log("no greeter selected"),
        }
    }
}
