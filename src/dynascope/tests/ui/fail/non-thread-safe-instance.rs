use std::rc::Rc;
use std::sync::Arc;

use dynascope::prelude::*;

fn main() {
    let _ = singleton(Arc::new(Rc::new(1_u8)));
}
