//! Java service template.
//!
//! A service renders as one `BabelServiceDefinition` class holding:
//!
//! - `Iface`: the method signatures to implement,
//! - `Client`: builds a call object per call and hands it to the transport,
//! - `Invoker`: maps method names to call-object classes for dispatch,
//! - one private call-object class per method carrying its arguments.

use tracing::debug;

use super::{typed_list, write_annotations, write_doc, write_preamble, JavaTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::plan::{MethodCall, ServicePlan};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::type_format::TypeFormatter;
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, AttributeTarget, Construct, ConstructKind, Service};

const IMPORTS: &[&str] = &[
    "java.util.HashMap",
    "java.util.Map",
    "com.concur.babel.ServiceMethod",
    "com.concur.babel.BabelService",
    "com.concur.babel.ResponseServiceMethod",
    "com.concur.babel.VoidServiceMethod",
    "com.concur.babel.processor.BaseInvoker",
    "com.concur.babel.transport.BaseClient",
    "com.concur.babel.transport.Transport",
    "com.concur.babel.service.BabelServiceDefinition",
];

/// Renders the interface, client, invoker and call objects of a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaServiceTemplate;

impl ConstructTemplate for JavaServiceTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Service
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Service(service) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "java".to_string(),
            });
        };
        debug!(name = %service.name, methods = service.methods.len(), "rendering java service");
        validate_construct(construct)?;
        ctx.resolver.check_construct(construct)?;
        let plan = ServicePlan::new(service)?;
        render_service(ctx, service, &plan).map_err(|err| err.at(&service.name))
    }
}

/// `Type a, Type b` for the parameters of a call.
fn signature_params(types: &JavaTypeMapper<'_>, call: &MethodCall<'_>) -> RenderResult<String> {
    typed_list(
        types,
        call.params.iter().map(|p| (&p.param.ty, p.member.as_str())),
    )
    .map_err(|e| e.in_member(&call.method.name))
}

fn render_service(
    ctx: &RenderContext<'_>,
    service: &Service,
    plan: &ServicePlan<'_>,
) -> RenderResult<String> {
    let types = JavaTypeMapper::new(ctx.resolver);
    let mut w = SourceWriter::new(ctx.config);

    write_preamble(&mut w, ctx, IMPORTS);
    write_doc(&mut w, ctx, &service.comments);
    write_annotations(&mut w, ctx, &types, &service.attributes, AttributeTarget::Service)?;
    w.open(format!("public class {} implements BabelServiceDefinition", service.name));
    w.blank();

    w.doc_comment(&["Gets the interface class for this service.".to_string()]);
    w.line("public Class<Iface> getIfaceClass() { return Iface.class; }");
    w.blank();
    w.doc_comment(&["Creates an Invoker wrapping the given service implementation.".to_string()]);
    w.line("public Invoker createInvoker(BabelService iFaceImpl) { return new Invoker((Iface) iFaceImpl); }");
    w.blank();

    write_iface(&mut w, ctx, &types, service, plan)?;
    w.blank();
    write_client(&mut w, &types, service, plan)?;
    w.blank();
    write_invoker(&mut w, service, plan)?;

    for call in &plan.calls {
        w.blank();
        write_call_object(&mut w, &types, service, call)?;
    }

    w.close()?;
    w.finish()
}

fn write_iface(
    w: &mut SourceWriter,
    ctx: &RenderContext<'_>,
    types: &JavaTypeMapper<'_>,
    service: &Service,
    plan: &ServicePlan<'_>,
) -> RenderResult<()> {
    w.doc_comment(&[format!(
        "The methods of the {} service. Implement this interface to provide the service.",
        service.name
    )]);
    w.open("public interface Iface extends BabelService");
    for call in &plan.calls {
        write_doc(w, ctx, &call.method.comments);
        write_annotations(w, ctx, types, &call.method.attributes, AttributeTarget::Method)
            .map_err(|e| e.in_member(&call.method.name))?;
        w.line(format!(
            "{} {}({});",
            types.format_type(call.returns())?,
            call.member,
            signature_params(types, call)?
        ));
    }
    w.close()
}

fn write_client(
    w: &mut SourceWriter,
    types: &JavaTypeMapper<'_>,
    service: &Service,
    plan: &ServicePlan<'_>,
) -> RenderResult<()> {
    w.doc_comment(&[format!(
        "Client for calling the {} service through a transport.",
        service.name
    )]);
    w.open("public static class Client extends BaseClient implements Iface");
    w.blank();
    w.line("public Client(String url) { super(url); }");
    w.line("public Client(String url, int timeoutInMillis) { super(url, timeoutInMillis); }");
    w.line("public Client(Transport transport) { super(transport); }");

    for call in &plan.calls {
        w.blank();
        w.open(format!(
            "public {} {}({})",
            types.format_type(call.returns())?,
            call.member,
            signature_params(types, call)?
        ));
        let local = call.local("serviceMethod");
        w.line(format!(
            "{} {} = new {}({});",
            call.call_type,
            local,
            call.call_type,
            call.argument_names().join(", ")
        ));
        if types.is_void(call.returns()) {
            w.line(format!("this.transport.invoke({});", local));
        } else {
            w.line(format!("return this.transport.invoke({});", local));
        }
        w.close()?;
    }
    w.close()
}

fn write_invoker(w: &mut SourceWriter, service: &Service, plan: &ServicePlan<'_>) -> RenderResult<()> {
    w.doc_comment(&[format!(
        "Invoker dispatching {} calls to a service implementation.",
        service.name
    )]);
    w.open("public static class Invoker extends BaseInvoker<Iface>");
    w.blank();
    w.line("public Invoker(Iface serviceImpl) { super(serviceImpl); }");
    w.blank();

    w.open("public Map<String, Class<? extends ServiceMethod>> initServiceMethods()");
    w.line("Map<String, Class<? extends ServiceMethod>> map = new HashMap<String, Class<? extends ServiceMethod>>();");
    for (method, call_type) in plan.dispatch_table() {
        w.line(format!("map.put(\"{}\", {}.class);", method, call_type));
    }
    w.line("return map;");
    w.close()?;
    w.blank();

    w.line(format!(
        "public String getServiceName() {{ return \"{}\"; }}",
        service.name
    ));
    w.line("public Class<Iface> getInterface() { return Iface.class; }");
    w.close()
}

fn write_call_object(
    w: &mut SourceWriter,
    types: &JavaTypeMapper<'_>,
    service: &Service,
    call: &MethodCall<'_>,
) -> RenderResult<()> {
    let base = if types.is_void(call.returns()) {
        "VoidServiceMethod".to_string()
    } else {
        format!("ResponseServiceMethod<{}>", types.format_type(call.returns())?)
    };
    w.open(format!("private static class {} extends {}", call.call_type, base));

    for param in &call.params {
        let ty = types.format_type(&param.param.ty)?;
        match &param.param.initializer {
            Some(literal) => {
                let value = types
                    .format_initializer(&param.param.ty, literal)
                    .map_err(|e| e.in_member(&format!("{}.{}", call.method.name, param.param.name)))?;
                w.line(format!("private {} {} = {};", ty, param.member, value));
            }
            None => w.line(format!("private {} {};", ty, param.member)),
        }
    }
    if !call.params.is_empty() {
        w.blank();
        w.line(format!("public {}() {{}}", call.call_type));
        w.open(format!(
            "public {}({})",
            call.call_type,
            signature_params(types, call)?
        ));
        for name in call.argument_names() {
            w.line(format!("this.{0} = {0};", name));
        }
        w.close()?;
    } else {
        w.line(format!("public {}() {{}}", call.call_type));
    }
    w.blank();

    w.line(format!(
        "public String getServiceName() {{ return \"{}\"; }}",
        service.name
    ));
    w.line(format!(
        "public String getMethodName() {{ return \"{}\"; }}",
        call.member
    ));
    w.blank();

    let values: Vec<String> = call
        .argument_names()
        .into_iter()
        .map(|name| format!("this.{}", name))
        .collect();
    w.open("public Object[] getMethodParameters()");
    if values.is_empty() {
        w.line("return new Object[] {};");
    } else {
        w.line(format!("return new Object[] {{ {} }};", values.join(", ")));
    }
    w.close()?;
    w.close()
}
