//! Animated changes to an item's horizontal offset and opacity.

use crate::host::ItemView;
use std::rc::Rc;
use swipedismiss_animation::{AnimationHandle, AnimationSpec, Animator, Lerp, ValueAnimation};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Presentation {
    pub translation_x: f32,
    pub alpha: f32,
}

impl Presentation {
    pub const REST: Presentation = Presentation {
        translation_x: 0.0,
        alpha: 1.0,
    };

    pub fn of(item: &dyn ItemView) -> Self {
        Self {
            translation_x: item.translation_x(),
            alpha: item.alpha(),
        }
    }

    fn lerp(&self, target: &Presentation, fraction: f32) -> Presentation {
        Presentation {
            translation_x: self.translation_x.lerp(&target.translation_x, fraction),
            alpha: self.alpha.lerp(&target.alpha, fraction),
        }
    }

    fn apply(&self, item: &dyn ItemView) {
        item.set_translation_x(self.translation_x);
        item.set_alpha(self.alpha);
    }
}

/// Animates `item` from its current presentation to `target`.
pub fn animate_presentation(
    animator: &dyn Animator,
    item: &Rc<dyn ItemView>,
    target: Presentation,
    spec: AnimationSpec,
    on_end: Option<Box<dyn FnOnce()>>,
) -> AnimationHandle {
    let from = Presentation::of(item.as_ref());
    let weak = Rc::downgrade(item);
    let mut animation = ValueAnimation::new(0.0, 1.0, spec).on_update(move |fraction| {
        if let Some(item) = weak.upgrade() {
            from.lerp(&target, fraction).apply(item.as_ref());
        }
    });
    if let Some(on_end) = on_end {
        animation = animation.on_end(on_end);
    }
    animator.start(animation)
}
