// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "This is a test module")]

//! Integration tests for the `Handler` trait.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use strata::{Execute, Handler};

struct Counter(AtomicU32);

impl Handler<()> for Counter {
    type Out = u32;

    fn invoke(&self, (): ()) -> Self::Out {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[test]
fn custom_handler_is_reusable() {
    let counter = Counter(AtomicU32::new(0));

    assert_eq!(counter.invoke(()), 1);
    assert_eq!(counter.invoke(()), 2);
    assert_eq!(counter.invoke(()), 3);
}

#[test]
fn boxed_handler_forwards() {
    let boxed: Box<dyn Handler<String, Out = usize>> = Box::new(Execute::new(|input: String| input.len()));

    assert_eq!(boxed.invoke("four".to_string()), 4);
}

#[test]
fn arc_handler_shares_state() {
    let shared = Arc::new(Counter(AtomicU32::new(0)));
    let first = Arc::clone(&shared);
    let second = Arc::clone(&shared);

    assert_eq!(first.invoke(()), 1);
    assert_eq!(second.invoke(()), 2);
    assert_eq!(shared.0.load(Ordering::SeqCst), 2);
}

#[test]
fn static_assertions() {
    static_assertions::assert_impl_all!(Execute<fn(u8) -> u8>: Handler<u8>, Send, Sync);
    static_assertions::assert_impl_all!(Arc<Counter>: Handler<()>);
    static_assertions::assert_impl_all!(Box<Counter>: Handler<()>);
}
