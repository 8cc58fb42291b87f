//! Probe components.

use crate::recorder::{RecordedCall, record};
use hatch::{Component, ComponentConfig, ComponentError, ComponentHandler, ComponentResult, Constructible};
use hatch_dom::{Document, NodeId};
use std::any::Any;

macro_rules! probe_component {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $ty {
            element: NodeId,
        }

        impl Component for $ty {
            fn element(&self) -> NodeId {
                self.element
            }

            fn downgrade(&mut self, _document: &mut Document) {
                record(RecordedCall::Downgraded {
                    component: stringify!($ty),
                    element: self.element,
                });
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        impl Constructible for $ty {
            fn construct(_handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
                record(RecordedCall::Constructed {
                    component: stringify!($ty),
                    element,
                });
                Ok(Self { element })
            }
        }
    };
}

probe_component!(
    /// Probe registered as `Foo` on `js-foo`.
    Foo
);
probe_component!(
    /// Probe registered as `Bar` on `js-bar`.
    Bar
);
probe_component!(
    /// Probe registered as `Baz` on `js-baz`.
    Baz
);

/// Register [`Foo`], [`Bar`] and [`Baz`] in that order.
pub fn register_probes(handler: &mut ComponentHandler) -> ComponentResult<()> {
    handler.register::<Foo>(ComponentConfig::new("Foo", "js-foo"))?;
    handler.register::<Bar>(ComponentConfig::new("Bar", "js-bar"))?;
    handler.register::<Baz>(ComponentConfig::new("Baz", "js-baz"))?;
    Ok(())
}

/// Component whose constructor always fails.
#[derive(Debug)]
pub struct Failing {
    element: NodeId,
}

impl Component for Failing {
    fn element(&self) -> NodeId {
        self.element
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Constructible for Failing {
    fn construct(_handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
        record(RecordedCall::Failed {
            component: "Failing",
            element,
        });
        Err(ComponentError::construction("Failing", "always fails"))
    }
}

/// Component that injects a `js-foo` child and upgrades it during
/// construction. It also asks to upgrade its own element again, which the
/// handler must treat as already applied.
#[derive(Debug)]
pub struct Nesting {
    element: NodeId,
    child: NodeId,
}

impl Nesting {
    pub const SELECTOR: &'static str = "js-nesting";

    /// The injected child element.
    pub fn child(&self) -> NodeId {
        self.child
    }
}

impl Component for Nesting {
    fn element(&self) -> NodeId {
        self.element
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Constructible for Nesting {
    fn construct(handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
        handler.upgrade_element(element, Some("Nesting"))?;

        let child = handler.document_mut().build("span").class("js-foo").append_to(element);
        handler.upgrade_elements(child)?;

        record(RecordedCall::Constructed {
            component: "Nesting",
            element,
        });
        Ok(Self { element, child })
    }
}

/// Checkbox with a required `hatch-checkbox__input` child.
///
/// Construction marks the element `is-upgraded`; the teardown hook removes
/// it again.
#[derive(Debug)]
pub struct Checkbox {
    element: NodeId,
    input: NodeId,
    checked: bool,
}

impl Checkbox {
    pub const SELECTOR: &'static str = "hatch-checkbox";
    pub const INPUT_CLASS: &'static str = "hatch-checkbox__input";
    pub const UPGRADED_CLASS: &'static str = "is-upgraded";
    pub const CHECKED_CLASS: &'static str = "is-checked";

    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Check the box and reflect the state on the element.
    pub fn check(&mut self, document: &mut Document) -> ComponentResult<()> {
        self.checked = true;
        document.add_class(self.element, Self::CHECKED_CLASS)?;
        document.set_attribute(self.input, "checked", "")?;
        Ok(())
    }

    pub fn uncheck(&mut self, document: &mut Document) -> ComponentResult<()> {
        self.checked = false;
        document.remove_class(self.element, Self::CHECKED_CLASS)?;
        document.remove_attribute(self.input, "checked")?;
        Ok(())
    }
}

impl Component for Checkbox {
    fn element(&self) -> NodeId {
        self.element
    }

    fn downgrade(&mut self, document: &mut Document) {
        if document.contains(self.element) {
            let _ = document.remove_class(self.element, Self::UPGRADED_CLASS);
        }
        record(RecordedCall::Downgraded {
            component: "Checkbox",
            element: self.element,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Constructible for Checkbox {
    fn construct(handler: &mut ComponentHandler, element: NodeId) -> ComponentResult<Self> {
        let document = handler.document_mut();
        let Some(input) = document.query_class_in(element, Self::INPUT_CLASS) else {
            record(RecordedCall::Failed {
                component: "Checkbox",
                element,
            });
            return Err(ComponentError::construction(
                "Checkbox",
                format!("missing .{} child", Self::INPUT_CLASS),
            ));
        };
        let checked = document.has_attribute(input, "checked");
        document.add_class(element, Self::UPGRADED_CLASS)?;
        if checked {
            document.add_class(element, Self::CHECKED_CLASS)?;
        }

        record(RecordedCall::Constructed {
            component: "Checkbox",
            element,
        });
        Ok(Self {
            element,
            input,
            checked,
        })
    }
}
