use std::sync::Arc;

use dynascope::prelude::*;

pub struct Level(pub u8);

dynascope::export!(LEVEL_LOW, "low", Provider::fixed(Arc::new(Level(1))));
export!(LEVEL_HIGH, "high", Provider::fixed(Arc::new(Level(9))),);

fn main() {
    let scope = Scope::new();
    let _ = SelectionRegistry::global().select::<Level>(&scope, "high");
    let _ = Export::new(Provider::fixed(Arc::new(Level(5))), "medium").is_valid();
}
