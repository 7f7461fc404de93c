//! Normalized view of a service used by the service templates.
//!
//! Each method becomes a [`MethodCall`]: the normalized method identifier,
//! the call-object type that carries its arguments, and the ordered
//! parameters. The invoker's dispatch table is the mapping from method
//! identifier to call-object type.

use std::collections::HashSet;

use crate::error::{RenderError, RenderResult};
use crate::ir::{Method, Parameter, Service, TypeRef};
use crate::naming::{to_member_case, to_type_case};

/// A parameter with its normalized names.
#[derive(Debug, Clone)]
pub struct CallParam<'a> {
    pub param: &'a Parameter,
    /// `camelCase` name used for arguments and fields.
    pub member: String,
    /// `PascalCase` name used for exported fields.
    pub exported: String,
}

/// One method of a service, as tagged call data.
#[derive(Debug, Clone)]
pub struct MethodCall<'a> {
    pub method: &'a Method,
    /// `camelCase` method identifier, the dispatch key.
    pub member: String,
    /// `PascalCase` name of the call-object type.
    pub call_type: String,
    pub params: Vec<CallParam<'a>>,
}

impl<'a> MethodCall<'a> {
    fn new(method: &'a Method) -> RenderResult<Self> {
        let mut seen = HashSet::new();
        let mut params = Vec::with_capacity(method.params.len());
        for param in &method.params {
            let member = to_member_case(&param.name)
                .map_err(|e| e.in_member(&format!("{}.{}", method.name, param.name)))?;
            if !seen.insert(member.clone()) {
                return Err(RenderError::invalid_identifier(
                    param.name.clone(),
                    "parameter name is not unique within the method",
                )
                .in_member(&method.name));
            }
            params.push(CallParam {
                param,
                exported: to_type_case(&param.name)?,
                member,
            });
        }

        Ok(Self {
            method,
            member: to_member_case(&method.name).map_err(|e| e.in_member(&method.name))?,
            call_type: to_type_case(&method.name).map_err(|e| e.in_member(&method.name))?,
            params,
        })
    }

    /// The declared return type.
    pub fn returns(&self) -> &'a TypeRef {
        &self.method.returns
    }

    /// Check if the method returns nothing.
    pub fn is_void(&self) -> bool {
        self.method.returns.is_void()
    }

    /// Argument names in declaration order.
    pub fn argument_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.member.as_str()).collect()
    }

    /// Name for a generated local variable that no argument shadows.
    ///
    /// Normalized argument names never contain underscores, so a trailing
    /// underscore always frees the name.
    pub fn local(&self, name: &str) -> String {
        if self.params.iter().any(|p| p.member == name) {
            format!("{}_", name)
        } else {
            name.to_string()
        }
    }
}

/// Every method of a service, normalized.
#[derive(Debug, Clone)]
pub struct ServicePlan<'a> {
    pub service: &'a Service,
    pub calls: Vec<MethodCall<'a>>,
}

impl<'a> ServicePlan<'a> {
    /// Normalize the methods of a service.
    ///
    /// Fails when two methods normalize to the same identifier.
    pub fn new(service: &'a Service) -> RenderResult<Self> {
        let mut seen = HashSet::new();
        let mut calls = Vec::with_capacity(service.methods.len());
        for method in &service.methods {
            let call = MethodCall::new(method).map_err(|e| e.at(&service.name))?;
            if !seen.insert(call.member.clone()) {
                return Err(RenderError::invalid_identifier(
                    method.name.clone(),
                    "method name is not unique within the service",
                )
                .at(&service.name));
            }
            calls.push(call);
        }
        Ok(Self { service, calls })
    }

    /// Dispatch table from method identifier to call-object type, in
    /// declaration order.
    pub fn dispatch_table(&self) -> impl Iterator<Item = (&str, &str)> {
        self.calls
            .iter()
            .map(|c| (c.member.as_str(), c.call_type.as_str()))
    }
}
