// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "This is a test module")]

//! Integration tests for layer stacking.

use strata::{Execute, Handler, Layer, Stack};

/// Appends its tag to the input on the way in and to the output on the way out.
#[derive(Clone, Copy)]
struct Tag(char);

struct Tagged<S> {
    tag: char,
    inner: S,
}

impl<S> Layer<S> for Tag {
    type Service = Tagged<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Tagged { tag: self.0, inner }
    }
}

impl<S> Handler<String> for Tagged<S>
where
    S: Handler<String, Out = String>,
{
    type Out = String;

    fn invoke(&self, mut input: String) -> Self::Out {
        input.push(self.tag);
        let mut output = self.inner.invoke(input);
        output.push(self.tag);
        output
    }
}

fn echo() -> Execute<impl Fn(String) -> String + Send + Sync + Clone> {
    Execute::new(|input: String| format!("{input}|"))
}

#[test]
fn single_layer() {
    let handler = (Tag('a'), echo()).build();

    assert_eq!(handler.invoke(String::new()), "a|a");
}

#[test]
fn layers_apply_outer_to_inner() {
    let handler = (Tag('a'), Tag('b'), Tag('c'), echo()).build();

    // inputs see the outermost layer first, outputs see it last
    assert_eq!(handler.invoke(String::new()), "abc|cba");
}

#[test]
fn eight_layers() {
    let handler = (
        Tag('1'),
        Tag('2'),
        Tag('3'),
        Tag('4'),
        Tag('5'),
        Tag('6'),
        Tag('7'),
        Tag('8'),
        echo(),
    )
        .build();

    assert_eq!(handler.invoke(String::new()), "12345678|87654321");
}

#[test]
fn built_stack_can_be_wrapped_again() {
    let inner = (Tag('b'), Tag('c'), echo()).build();
    let before = inner.invoke("x".to_string());

    let outer = Tag('a').layer(inner);

    assert_eq!(before, "xbc|cb");
    assert_eq!(outer.invoke("x".to_string()), "xabc|cba");
}
