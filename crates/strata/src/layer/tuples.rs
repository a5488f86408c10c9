// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use tower_layer::Layer;

use super::Stack;

impl<L, S> Stack for (L, S)
where
    L: Layer<S>,
{
    type Service = L::Service;

    fn build(self) -> Self::Service {
        let (layer, handler) = self;

        layer.layer(handler)
    }
}

// Each tuple builds its tail first and then wraps the result with its head, so the
// innermost layer is applied to the handler before any outer layer exists.
macro_rules! impl_stack {
    ($head:ident $head_value:ident, $($tail:ident $tail_value:ident),+) => {
        impl<$head, $($tail,)+ S> Stack for ($head, $($tail,)+ S)
        where
            ($($tail,)+ S): Stack,
            $head: Layer<<($($tail,)+ S) as Stack>::Service>,
        {
            type Service = <$head as Layer<<($($tail,)+ S) as Stack>::Service>>::Service;

            fn build(self) -> Self::Service {
                let ($head_value, $($tail_value,)+ handler) = self;

                $head_value.layer(($($tail_value,)+ handler).build())
            }
        }

        impl_stack!($($tail $tail_value),+);
    };
    ($last:ident $last_value:ident) => {};
}

impl_stack!(L1 l1, L2 l2, L3 l3, L4 l4, L5 l5, L6 l6, L7 l7, L8 l8);
