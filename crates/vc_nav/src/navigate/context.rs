use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::func::{Function, FunctionRegistry};
use crate::path::Segment;
use crate::value::Value;

type Recognizer = dyn Fn(&Value, &Segment) + Send + Sync;

// -----------------------------------------------------------------------------
// NavContext

/// Per-call configuration of a navigation.
///
/// - Functions registered here shadow the navigator's functions.
/// - The recognizer observes every value computed during the walk, e.g. to
///   detect cycles. It cannot alter the walk.
/// - Settings are free-form values read by functions.
///
/// # Examples
///
/// ```
/// use vc_nav::func::Function;
/// use vc_nav::{NavContext, Value};
///
/// let ctx = NavContext::new()
///     .with_function("answer", Function::new(|_, _, _| Ok(Value::Int(42))))
///     .with_setting("locale", "de");
///
/// assert!(ctx.functions().contains("answer"));
/// assert_eq!(ctx.setting("locale"), Some(&Value::from("de")));
/// ```
#[derive(Clone, Default)]
pub struct NavContext {
    functions: FunctionRegistry,
    recognizer: Option<Arc<Recognizer>>,
    settings: BTreeMap<String, Value>,
}

impl NavContext {
    /// An empty context.
    #[inline]
    pub const fn new() -> Self {
        Self {
            functions: FunctionRegistry::new(),
            recognizer: None,
            settings: BTreeMap::new(),
        }
    }

    /// Adds a context-local function.
    pub fn with_function(mut self, name: impl Into<Box<str>>, function: Function) -> Self {
        self.functions.register(name, function);
        self
    }

    /// Replaces the context-local functions.
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    /// Sets the recognizer.
    pub fn with_recognizer(mut self, f: impl Fn(&Value, &Segment) + Send + Sync + 'static) -> Self {
        let recognizer: Arc<Recognizer> = Arc::new(f);
        self.recognizer = Some(recognizer);
        self
    }

    /// Adds a setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    #[inline]
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    #[inline]
    pub fn settings(&self) -> &BTreeMap<String, Value> {
        &self.settings
    }

    /// Reports `value`, computed by `segment`, to the recognizer.
    #[inline]
    pub(crate) fn observe(&self, value: &Value, segment: &Segment) {
        if let Some(recognizer) = &self.recognizer {
            recognizer(value, segment);
        }
    }
}

impl fmt::Debug for NavContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavContext")
            .field("functions", &self.functions)
            .field("recognizer", &self.recognizer.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}
