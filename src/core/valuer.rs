//! Deferred, context-dependent field producers

use super::context::Context;
use super::field::{Field, FieldValue, ERROR_KEY};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A function from the call's [`Context`] to a [`Field`].
///
/// Valuers are evaluated once per enabled log call, in the order they were
/// attached to the logger. Cloning is cheap: clones share the function.
#[derive(Clone)]
pub struct Valuer(Arc<dyn Fn(&Context) -> Field + Send + Sync>);

impl Valuer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Context) -> Field + Send + Sync + 'static,
    {
        Valuer(Arc::new(f))
    }

    /// A valuer that ignores the context and always yields `field`.
    pub fn immut(field: Field) -> Self {
        Self::new(move |_| field.clone())
    }

    #[inline]
    pub fn call(&self, ctx: &Context) -> Field {
        (self.0)(ctx)
    }

    pub fn immut_string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::immut(Field::string(key, value))
    }

    pub fn immut_int(key: impl Into<String>, value: i64) -> Self {
        Self::immut(Field::int(key, value))
    }

    pub fn immut_uint(key: impl Into<String>, value: u64) -> Self {
        Self::immut(Field::uint(key, value))
    }

    pub fn immut_float(key: impl Into<String>, value: f64) -> Self {
        Self::immut(Field::float(key, value))
    }

    pub fn immut_bool(key: impl Into<String>, value: bool) -> Self {
        Self::immut(Field::bool(key, value))
    }

    pub fn immut_duration(key: impl Into<String>, value: Duration) -> Self {
        Self::immut(Field::duration(key, value))
    }

    pub fn immut_time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::immut(Field::time(key, value))
    }

    pub fn immut_error(err: &(dyn std::error::Error + '_)) -> Self {
        Self::immut(Field::error(err))
    }

    pub fn immut_any(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::immut(Field::any(key, value))
    }

    pub fn from_string<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> String + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::string(key.clone(), f(ctx)))
    }

    pub fn from_int<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> i64 + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::int(key.clone(), f(ctx)))
    }

    pub fn from_uint<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> u64 + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::uint(key.clone(), f(ctx)))
    }

    pub fn from_float<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> f64 + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::float(key.clone(), f(ctx)))
    }

    pub fn from_bool<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::bool(key.clone(), f(ctx)))
    }

    pub fn from_duration<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> Duration + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::duration(key.clone(), f(ctx)))
    }

    pub fn from_time<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> DateTime<Utc> + Send + Sync + 'static,
    {
        let key = key.into();
        Self::new(move |ctx| Field::time(key.clone(), f(ctx)))
    }

    /// Error derived from the context, under the reserved `"error"` key.
    /// `None` yields a null value.
    pub fn from_error<F, E>(f: F) -> Self
    where
        F: Fn(&Context) -> Option<E> + Send + Sync + 'static,
        E: std::error::Error,
    {
        Self::new(move |ctx| match f(ctx) {
            Some(err) => Field::error(&err),
            None => Field::null(ERROR_KEY),
        })
    }

    pub fn from_any<F, V>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> V + Send + Sync + 'static,
        V: Into<FieldValue>,
    {
        let key = key.into();
        Self::new(move |ctx| Field::any(key.clone(), f(ctx)))
    }

    pub fn from_reflect<F, V>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Context) -> V + Send + Sync + 'static,
        V: Serialize,
    {
        let key = key.into();
        Self::new(move |ctx| Field::reflect(key.clone(), &f(ctx)))
    }

    /// `pkg` = `name`
    pub fn package(name: impl Into<String>) -> Self {
        Self::immut_string("pkg", name)
    }

    pub fn app(name: impl Into<String>) -> Self {
        Self::immut_string("app", name)
    }

    pub fn component(name: impl Into<String>) -> Self {
        Self::immut_string("component", name)
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::immut_string("module", name)
    }

    pub fn unit(name: impl Into<String>) -> Self {
        Self::immut_string("unit", name)
    }

    pub fn kind(name: impl Into<String>) -> Self {
        Self::immut_string("kind", name)
    }

    pub fn type_(name: impl Into<String>) -> Self {
        Self::immut_string("type", name)
    }

    /// `traceId` extracted from the call's context.
    pub fn trace_id<F>(f: F) -> Self
    where
        F: Fn(&Context) -> String + Send + Sync + 'static,
    {
        Self::from_string("traceId", f)
    }

    /// `requestId` extracted from the call's context.
    pub fn request_id<F>(f: F) -> Self
    where
        F: Fn(&Context) -> String + Send + Sync + 'static,
    {
        Self::from_string("requestId", f)
    }
}

impl fmt::Debug for Valuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Valuer(..)")
    }
}

impl From<Field> for Valuer {
    fn from(field: Field) -> Self {
        Self::immut(field)
    }
}
