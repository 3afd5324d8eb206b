use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::accessor::{Accessor, AccessorMode, PropertyDescriptor, TypeDescriptor};
use crate::func::{Function, FunctionError, FunctionRegistry};
use crate::info::{ClassInfo, ClassRef, DeclaredType, Type};
use crate::introspect::{
    ConfigurationError, ConventionIntrospector, Introspector, Matcher, StandardTypeReflector,
    TypeReflector,
};
use crate::navigate::{
    DefaultObjectFactory, NavContext, NavError, NavigatorConfig, ObjectFactory, TraversalMode,
};
use crate::path::{FunctionCall, Path, PathCache, PathSyntaxError, Segment, Selector};
use crate::registry::DescriptorCache;
use crate::value::{InvokeError, ObjectRef, Value};

static EMPTY_CONTEXT: NavContext = NavContext::new();

// -----------------------------------------------------------------------------
// Navigator

/// Evaluates paths against host objects.
///
/// A navigator is immutable after construction except for
/// [`register_function`](Self::register_function), which needs `&mut self`;
/// every other operation takes `&self` and can run from many threads at
/// once. Descriptors and parsed paths are cached across calls.
///
/// # Examples
///
/// ```
/// use vc_nav::prelude::*;
///
/// #[derive(Default)]
/// struct Point { x: i64 }
///
/// impl Typed for Point {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::builder::<Self>()
///                 .method(MethodInfo::shared("x", |p: &Point, _| Ok(p.x.into())).returning(DeclaredType::Int))
///                 .method(
///                     MethodInfo::exclusive("set_x", |p: &mut Point, args| {
///                         p.x = vc_nav::value::arg(args, 0)?;
///                         Ok(Value::Null)
///                     })
///                     .with_params([DeclaredType::Int]),
///                 )
///                 .build()
///         })
///     }
/// }
///
/// let nav = Navigator::new();
/// let ctx = NavContext::new();
/// let point = Value::object(Point::default());
///
/// assert!(nav.set_value(&point, "x", Value::Int(3), TraversalMode::FailIfNull, &ctx).unwrap());
/// assert_eq!(nav.get_value(&point, "x", TraversalMode::FailIfNull, &ctx).unwrap(), Some(Value::Int(3)));
/// ```
pub struct Navigator {
    config: NavigatorConfig,
    cache: Arc<DescriptorCache>,
    functions: FunctionRegistry,
    factory: Arc<dyn ObjectFactory>,
    types: Arc<dyn TypeReflector>,
    paths: PathCache,
}

impl Navigator {
    /// A navigator with the default configuration.
    #[inline]
    pub fn new() -> Self {
        NavigatorBuilder::new().build()
    }

    #[inline]
    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    #[inline]
    pub const fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// The descriptor cache, possibly shared with other navigators.
    #[inline]
    pub fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    #[inline]
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Registers a function, returning the one it replaces.
    pub fn register_function(&mut self, name: impl Into<Box<str>>, function: Function) -> Option<Function> {
        self.functions.register(name, function)
    }

    /// Adds a matcher ahead of the existing ones.
    ///
    /// Clears the descriptor cache when the matcher is accepted. Returns
    /// `false` if the introspector does not support custom matchers.
    pub fn register_matcher(&self, matcher: Arc<dyn Matcher>) -> bool {
        let accepted = self.cache.introspector().register_matcher(matcher);
        if accepted {
            self.cache.clear();
        } else {
            log::warn!("the introspector rejected a custom matcher");
        }
        accepted
    }

    /// Drops the cached descriptors of `ty`.
    #[inline]
    pub fn invalidate(&self, ty: Type) -> usize {
        self.cache.invalidate(ty)
    }

    /// Returns the descriptor of `class` under this navigator's configuration.
    #[inline]
    pub fn descriptor(&self, class: &'static ClassInfo) -> Result<Arc<TypeDescriptor>, ConfigurationError> {
        self.cache.get(class, &self.config.introspection)
    }

    /// Parses `path` through the path cache.
    #[inline]
    pub fn parse(&self, path: &str) -> Result<Path, PathSyntaxError> {
        self.paths.get_or_parse(path)
    }

    // -------------------------------------------------------------------------
    // Value mode

    /// Reads the value at `path`.
    ///
    /// Returns `Ok(None)` if the final value is null, or if an intermediate
    /// value is null under [`TraversalMode::ReturnIfNull`].
    ///
    /// [`TraversalMode::CreateIfNull`] is rejected since no write follows.
    pub fn get_value(
        &self,
        root: &Value,
        path: &str,
        mode: TraversalMode,
        ctx: &NavContext,
    ) -> Result<Option<Value>, NavError> {
        let path = self.parse(path)?;
        self.get_value_at(root, &path, mode, ctx)
    }

    /// [`get_value`](Self::get_value) with a parsed path.
    pub fn get_value_at(
        &self,
        root: &Value,
        path: &Path,
        mode: TraversalMode,
        ctx: &NavContext,
    ) -> Result<Option<Value>, NavError> {
        if mode == TraversalMode::CreateIfNull {
            return Err(NavError::InvalidMode {
                mode,
                operation: "get_value",
                path: path.as_str().into(),
                reason: "creating intermediates requires a final write",
            });
        }

        let walk = Walk::new(self, path, mode, ctx);
        let segments = path.segments();
        let Some(first) = segments.first() else {
            return Ok(Some(root.clone()));
        };
        let last = segments.len() - 1;

        if root.is_null() {
            return walk.absent(0, first, None);
        }

        let mut current = root.clone();
        for (index, segment) in segments.iter().enumerate() {
            let value = match walk.read(&current, index, segment, None)? {
                Some(value) => value,
                None => return Ok(None),
            };
            if value.is_null() {
                if index == last {
                    return Ok(None);
                }
                return walk.absent(index, segment, None);
            }
            ctx.observe(&value, segment);
            current = value;
        }
        Ok(Some(current))
    }

    /// [`get_value`](Self::get_value) with the configured default mode and an
    /// empty context.
    pub fn get_value_default(&self, root: &Value, path: &str) -> Result<Option<Value>, NavError> {
        self.get_value(root, path, self.config.default_mode, &EMPTY_CONTEXT)
    }

    /// Writes `value` at `path`.
    ///
    /// The final segment is written through its `WRITE` accessor, or the
    /// indexed or keyed write accessor if it has a selector. A plural
    /// property without `WRITE` falls back to `ADD`.
    ///
    /// Returns `Ok(false)` if the write was skipped because an intermediate
    /// value is null under [`TraversalMode::ReturnIfNull`].
    pub fn set_value(
        &self,
        root: &Value,
        path: &str,
        value: Value,
        mode: TraversalMode,
        ctx: &NavContext,
    ) -> Result<bool, NavError> {
        let path = self.parse(path)?;
        self.set_value_at(root, &path, value, mode, ctx)
    }

    /// [`set_value`](Self::set_value) with a parsed path.
    pub fn set_value_at(
        &self,
        root: &Value,
        path: &Path,
        value: Value,
        mode: TraversalMode,
        ctx: &NavContext,
    ) -> Result<bool, NavError> {
        let walk = Walk::new(self, path, mode, ctx);
        let Some((last, parents)) = path.segments().split_last() else {
            return Ok(false);
        };

        if last.function().is_some() {
            return Err(NavError::InvalidTarget {
                path: path.as_str().into(),
                reason: "the final segment applies a function",
            });
        }
        let creating = mode == TraversalMode::CreateIfNull;
        if creating {
            walk.check_writable(root, parents, last)?;
        }

        if root.is_null() {
            return walk.absent(0, parents.first().unwrap_or(last), false);
        }

        // The first created value stays detached until the final write succeeds.
        let mut pending = None;
        let mut current = root.clone();
        for (index, segment) in parents.iter().enumerate() {
            let value = match walk.read(&current, index, segment, creating.then_some(&mut pending))? {
                Some(value) => value,
                None => return Ok(false),
            };
            if value.is_null() {
                return walk.absent(index, segment, false);
            }
            ctx.observe(&value, segment);
            current = value;
        }

        let index = parents.len();
        let Some((target, descriptor)) = walk.owner(&current, index, last)? else {
            return Ok(false);
        };
        let Some(property) = descriptor.property(last.name()) else {
            return walk.unknown_property(descriptor.ty().name(), last).map(|()| false);
        };
        let (accessor, write_mode) = walk.write_accessor(&descriptor, property, last, true)?;

        let mut args = selector_args(last);
        args.push(value);
        accessor
            .invoke(&target, &args)
            .map_err(|source| walk.invocation(&descriptor, last, index, write_mode, source))?;
        if let Some(pending) = pending {
            walk.attach(pending)?;
        }
        log::trace!("wrote `{}` of `{}` through `{write_mode}`", last.name(), path);
        Ok(true)
    }

    /// [`set_value`](Self::set_value) with the configured default mode and an
    /// empty context.
    pub fn set_value_default(&self, root: &Value, path: &str, value: Value) -> Result<bool, NavError> {
        self.set_value(root, path, value, self.config.default_mode, &EMPTY_CONTEXT)
    }

    // -------------------------------------------------------------------------
    // Type mode

    /// Computes the declared type at `path` without touching any instance.
    ///
    /// A selector into a plural property whose element type is not declared
    /// makes the path unsafe: under [`TraversalMode::FailIfNull`] this is
    /// an error, otherwise the result is [`DeclaredType::Unknown`].
    pub fn get_type(
        &self,
        root: &DeclaredType,
        path: &str,
        mode: TraversalMode,
        ctx: &NavContext,
    ) -> Result<DeclaredType, NavError> {
        let path = self.parse(path)?;
        self.get_type_at(root, &path, mode, ctx)
    }

    /// [`get_type`](Self::get_type) with a parsed path.
    pub fn get_type_at(
        &self,
        root: &DeclaredType,
        path: &Path,
        mode: TraversalMode,
        ctx: &NavContext,
    ) -> Result<DeclaredType, NavError> {
        Walk::new(self, path, mode, ctx).types(root.clone(), path.segments())
    }

    /// [`get_type`](Self::get_type) with the configured default mode and an
    /// empty context.
    pub fn get_type_default(&self, root: &DeclaredType, path: &str) -> Result<DeclaredType, NavError> {
        self.get_type(root, path, self.config.default_mode, &EMPTY_CONTEXT)
    }
}

impl Default for Navigator {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .field("functions", &self.functions)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// NavigatorBuilder

/// Configures and creates a [`Navigator`].
///
/// # Examples
///
/// ```
/// use vc_nav::prelude::*;
/// use vc_nav::func::Function;
///
/// let nav = Navigator::builder()
///     .config(NavigatorConfig {
///         default_mode: TraversalMode::FailIfNull,
///         ..Default::default()
///     })
///     .function("twice", Function::new(|v, _, _| Ok(Value::list([v.clone(), v]))))
///     .build();
///
/// assert_eq!(nav.config().default_mode, TraversalMode::FailIfNull);
/// assert!(nav.functions().contains("twice"));
/// ```
pub struct NavigatorBuilder {
    config: NavigatorConfig,
    introspector: Option<Arc<dyn Introspector>>,
    cache: Option<Arc<DescriptorCache>>,
    matchers: Vec<Arc<dyn Matcher>>,
    functions: FunctionRegistry,
    factory: Option<Arc<dyn ObjectFactory>>,
    types: Option<Arc<dyn TypeReflector>>,
}

impl NavigatorBuilder {
    pub fn new() -> Self {
        #[cfg(feature = "builtin_functions")]
        let functions = FunctionRegistry::with_builtins();
        #[cfg(not(feature = "builtin_functions"))]
        let functions = FunctionRegistry::new();

        Self {
            config: NavigatorConfig::default(),
            introspector: None,
            cache: None,
            matchers: Vec::new(),
            functions,
            factory: None,
            types: None,
        }
    }

    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the introspection strategy.
    ///
    /// Ignored if a [`cache`](Self::cache) is supplied.
    pub fn introspector(mut self, introspector: Arc<dyn Introspector>) -> Self {
        self.introspector = Some(introspector);
        self
    }

    /// Shares an existing descriptor cache.
    pub fn cache(mut self, cache: Arc<DescriptorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Adds a custom matcher; later calls take precedence over earlier ones.
    pub fn matcher(mut self, matcher: Arc<dyn Matcher>) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn function(mut self, name: impl Into<Box<str>>, function: Function) -> Self {
        self.functions.register(name, function);
        self
    }

    /// Replaces the whole function registry, built-ins included.
    pub fn functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    pub fn factory(mut self, factory: Arc<dyn ObjectFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    pub fn type_reflector(mut self, types: Arc<dyn TypeReflector>) -> Self {
        self.types = Some(types);
        self
    }

    pub fn build(self) -> Navigator {
        let types: Arc<dyn TypeReflector> = match self.types {
            Some(types) => types,
            None => Arc::new(StandardTypeReflector),
        };
        let cache = match self.cache {
            Some(cache) => cache,
            None => {
                let introspector: Arc<dyn Introspector> = match self.introspector {
                    Some(introspector) => introspector,
                    None => Arc::new(ConventionIntrospector::with_type_reflector(types.clone())),
                };
                Arc::new(DescriptorCache::with_introspector(introspector))
            }
        };
        let factory: Arc<dyn ObjectFactory> = match self.factory {
            Some(factory) => factory,
            None => Arc::new(DefaultObjectFactory),
        };

        if !self.matchers.is_empty() {
            for matcher in self.matchers {
                if !cache.introspector().register_matcher(matcher) {
                    log::warn!("the introspector rejected a custom matcher");
                }
            }
            cache.clear();
        }

        Navigator {
            config: self.config,
            cache,
            functions: self.functions,
            factory,
            types,
            paths: PathCache::new(),
        }
    }
}

impl Default for NavigatorBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Walk

/// The state of one traversal.
struct Walk<'a> {
    nav: &'a Navigator,
    path: &'a Path,
    mode: TraversalMode,
    ctx: &'a NavContext,
}

/// A created value and the write that links it into its owner.
struct Attach<'s> {
    target: ObjectRef,
    descriptor: Arc<TypeDescriptor>,
    accessor: Arc<Accessor>,
    mode: AccessorMode,
    args: Vec<Value>,
    index: usize,
    segment: &'s Segment,
}

fn selector_args(segment: &Segment) -> Vec<Value> {
    segment.selector().map(Selector::to_value).into_iter().collect()
}

impl<'a> Walk<'a> {
    fn new(nav: &'a Navigator, path: &'a Path, mode: TraversalMode, ctx: &'a NavContext) -> Self {
        Self { nav, path, mode, ctx }
    }

    fn path_string(&self) -> String {
        self.path.as_str().into()
    }

    fn descriptor(&self, class: &'static ClassInfo) -> Result<Arc<TypeDescriptor>, NavError> {
        Ok(self.nav.descriptor(class)?)
    }

    /// A null value at `index`: stops with `stop` or fails, per mode.
    fn absent<T>(&self, index: usize, segment: &Segment, stop: T) -> Result<T, NavError> {
        match self.mode {
            TraversalMode::ReturnIfNull => {
                log::trace!("`{}` is null at segment {index}, stopping", self.path);
                Ok(stop)
            }
            _ => Err(NavError::NullPath {
                property: segment.name().into(),
                segment: index,
                path: self.path_string(),
            }),
        }
    }

    /// An unknown property: tolerated only under `RETURN_IF_NULL`.
    fn unknown_property(&self, ty: &str, segment: &Segment) -> Result<(), NavError> {
        match self.mode {
            TraversalMode::ReturnIfNull => Ok(()),
            _ => Err(NavError::UnknownProperty {
                ty: ty.into(),
                property: segment.name().into(),
                path: self.path_string(),
            }),
        }
    }

    fn not_found(&self, descriptor: &TypeDescriptor, segment: &Segment, mode: AccessorMode) -> NavError {
        NavError::AccessorNotFound {
            ty: descriptor.ty().name().into(),
            property: segment.name().into(),
            mode,
            path: self.path_string(),
        }
    }

    fn invocation(
        &self,
        descriptor: &TypeDescriptor,
        segment: &Segment,
        index: usize,
        mode: AccessorMode,
        source: InvokeError,
    ) -> NavError {
        NavError::AccessorInvocation {
            ty: descriptor.ty().name().into(),
            property: segment.name().into(),
            mode,
            segment: index,
            path: self.path_string(),
            source,
        }
    }

    /// Resolves the object owning `segment`.
    ///
    /// `Ok(None)` if `owner` is not an object and the mode tolerates unknown
    /// properties.
    fn owner(
        &self,
        owner: &Value,
        index: usize,
        segment: &Segment,
    ) -> Result<Option<(ObjectRef, Arc<TypeDescriptor>)>, NavError> {
        match owner {
            Value::Object(object) => {
                let descriptor = self.descriptor(object.class_info())?;
                Ok(Some((object.clone(), descriptor)))
            }
            other => {
                log::trace!("segment {index} of `{}` applied to a {}", self.path, other.kind_name());
                self.unknown_property(other.kind_name(), segment).map(|()| None)
            }
        }
    }

    fn function(&self, call: &FunctionCall) -> Result<&'a Function, NavError> {
        self.ctx
            .functions()
            .get(call.name())
            .or_else(|| self.nav.functions.get(call.name()))
            .ok_or_else(|| NavError::FunctionNotFound {
                name: call.name().into(),
                path: self.path_string(),
            })
    }

    fn function_error(&self, call: &FunctionCall, index: usize, source: FunctionError) -> NavError {
        NavError::FunctionInvocation {
            name: call.name().into(),
            segment: index,
            path: self.path_string(),
            source,
        }
    }

    /// Picks the accessor that writes `segment`.
    fn write_accessor(
        &self,
        descriptor: &TypeDescriptor,
        property: &PropertyDescriptor,
        segment: &Segment,
        allow_add: bool,
    ) -> Result<(Arc<Accessor>, AccessorMode), NavError> {
        let mode = segment.selector().map_or(AccessorMode::WRITE, Selector::write_mode);
        if let Some(accessor) = descriptor.accessor(property, mode) {
            return Ok((accessor, mode));
        }
        if allow_add && segment.selector().is_none() && self.nav.types.is_plural(property.declared()) {
            if let Some(accessor) = descriptor.accessor(property, AccessorMode::ADD) {
                return Ok((accessor, AccessorMode::ADD));
            }
        }
        Err(self.not_found(descriptor, segment, mode))
    }

    /// Reads one segment from `owner`, applying its function.
    ///
    /// `Ok(None)` stops the walk. A null result is returned as
    /// `Value::Null` unless `pending` is given, in which case it is replaced
    /// by a new instance (see [`create`](Self::create)).
    fn read<'s>(
        &self,
        owner: &Value,
        index: usize,
        segment: &'s Segment,
        pending: Option<&mut Option<Attach<'s>>>,
    ) -> Result<Option<Value>, NavError> {
        let Some((target, descriptor)) = self.owner(owner, index, segment)? else {
            return Ok(None);
        };
        let Some(property) = descriptor.property(segment.name()) else {
            return self.unknown_property(descriptor.ty().name(), segment).map(|()| None);
        };

        let mode = segment.read_mode();
        let accessor = descriptor
            .accessor(property, mode)
            .ok_or_else(|| self.not_found(&descriptor, segment, mode))?;

        let mut value = match accessor.invoke(&target, &selector_args(segment)) {
            Ok(value) => value,
            Err(e) if e.is_absence() => {
                log::trace!("segment {index} of `{}` is absent: {e}", self.path);
                Value::Null
            }
            Err(source) => return Err(self.invocation(&descriptor, segment, index, mode, source)),
        };

        if let Some(call) = segment.function() {
            value = self
                .function(call)?
                .apply(value, call.args(), self.ctx)
                .map_err(|source| self.function_error(call, index, source))?;
        } else if value.is_null()
            && let Some(pending) = pending
        {
            let declared = accessor.value_type().clone();
            let (accessor, mode) = self.write_accessor(&descriptor, property, segment, false)?;
            let link = Attach {
                target,
                descriptor,
                accessor,
                mode,
                args: selector_args(segment),
                index,
                segment,
            };
            value = self.create(link, &declared, pending)?;
        }

        log::trace!("segment {index} of `{}` yields {}", self.path, value.kind_name());
        Ok(Some(value))
    }

    /// Instantiates `declared` and links it through `link`.
    ///
    /// The first instance of a walk is left in `pending`, since its owner
    /// is still part of the caller's graph. Later ones are written into
    /// their owners at once: those owners were created by this walk.
    fn create<'s>(
        &self,
        mut link: Attach<'s>,
        declared: &DeclaredType,
        pending: &mut Option<Attach<'s>>,
    ) -> Result<Value, NavError> {
        let created = self
            .nav
            .factory
            .create(declared)
            .map_err(|source| NavError::Instantiation {
                property: link.segment.name().into(),
                declared: declared.clone(),
                path: self.path_string(),
                source,
            })?;

        let index = link.index;
        link.args.push(created.clone());
        if pending.is_some() {
            self.attach(link)?;
        } else {
            *pending = Some(link);
        }

        log::debug!("created `{declared}` at segment {index} of `{}`", self.path);
        Ok(created)
    }

    fn attach(&self, attach: Attach<'_>) -> Result<(), NavError> {
        attach
            .accessor
            .invoke(&attach.target, &attach.args)
            .map(drop)
            .map_err(|source| {
                self.invocation(&attach.descriptor, attach.segment, attach.index, attach.mode, source)
            })
    }

    /// Fails before any side effect if the final segment cannot be written.
    ///
    /// Owners that are not statically known are checked during the walk.
    fn check_writable(&self, root: &Value, parents: &[Segment], last: &Segment) -> Result<(), NavError> {
        let Value::Object(object) = root else {
            return Ok(());
        };
        let lenient = Walk {
            mode: TraversalMode::ReturnIfNull,
            ..*self
        };
        let owner = lenient.types(DeclaredType::Object(ClassRef::from_info(object.class_info())), parents)?;
        let Some(class) = owner.class() else {
            return Ok(());
        };

        let descriptor = self.descriptor(class.class_info())?;
        let Some(property) = descriptor.property(last.name()) else {
            return self.unknown_property(descriptor.ty().name(), last);
        };
        match self.write_accessor(&descriptor, property, last, true) {
            Ok(_) => Ok(()),
            Err(NavError::AccessorNotFound { .. }) => Err(NavError::InvalidMode {
                mode: self.mode,
                operation: "set_value",
                path: self.path_string(),
                reason: "the final property is read-only",
            }),
            Err(e) => Err(e),
        }
    }

    /// Unsafe type evaluation: fails or yields `Unknown`, per mode.
    fn unsafe_path(&self, ty: &str, index: usize, segment: &Segment) -> Result<DeclaredType, NavError> {
        match self.mode {
            TraversalMode::FailIfNull => Err(NavError::UnsafePath {
                ty: ty.into(),
                property: segment.name().into(),
                segment: index,
                path: self.path_string(),
            }),
            _ => {
                log::trace!("segment {index} of `{}` has no static type", self.path);
                Ok(DeclaredType::Unknown)
            }
        }
    }

    /// Walks `segments` over declared types.
    fn types(&self, root: DeclaredType, segments: &[Segment]) -> Result<DeclaredType, NavError> {
        let mut current = root;
        for (index, segment) in segments.iter().enumerate() {
            let Some(class) = current.class() else {
                if current.is_unknown() {
                    return self.unsafe_path(current.kind_name(), index, segment);
                }
                let ty = current.to_string();
                return self.unknown_property(&ty, segment).map(|()| DeclaredType::Unknown);
            };

            let descriptor = self.descriptor(class.class_info())?;
            let Some(property) = descriptor.property(segment.name()) else {
                return self
                    .unknown_property(descriptor.ty().name(), segment)
                    .map(|()| DeclaredType::Unknown);
            };

            let mode = segment.read_mode();
            let accessor = descriptor
                .accessor(property, mode)
                .ok_or_else(|| self.not_found(&descriptor, segment, mode))?;

            let mut ty = match segment.selector() {
                None => property.declared().clone(),
                Some(_) => {
                    let declared = property.declared();
                    let raw = self.nav.types.is_plural(declared)
                        && self.nav.types.element_type(declared).is_none();
                    if raw || accessor.value_type().is_unknown() {
                        return self.unsafe_path(descriptor.ty().name(), index, segment);
                    }
                    accessor.value_type().clone()
                }
            };

            if let Some(call) = segment.function() {
                ty = self
                    .function(call)?
                    .apply_type(&ty, call.args(), self.ctx)
                    .map_err(|source| self.function_error(call, index, source))?;
            }
            current = ty;
        }
        Ok(current)
    }
}
