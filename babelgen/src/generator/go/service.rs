//! Go service template.
//!
//! A service `Calc` renders as:
//!
//! - `ICalc`: the interface a server implements,
//! - `CalcSumRequest` / `CalcSumResponse`: the call object and result of
//!   each method,
//! - `Calc`: a dispatcher wrapping an `ICalc`, with a method-name map,
//! - `CalcTransport` and `CalcClient`: the calling side.

use tracing::debug;

use super::{init_statements, json_tag, type_imports, write_comment, write_preamble, GoTypeMapper};
use crate::error::{RenderError, RenderResult};
use crate::generator::plan::{MethodCall, ServicePlan};
use crate::generator::traits::{ConstructTemplate, RenderContext};
use crate::generator::type_format::TypeFormatter;
use crate::generator::writer::SourceWriter;
use crate::ir::{validate_construct, Construct, ConstructKind, Service};

/// Renders the interface, call objects, dispatcher and client of a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoServiceTemplate;

impl ConstructTemplate for GoServiceTemplate {
    fn kind(&self) -> ConstructKind {
        ConstructKind::Service
    }

    fn render(&self, ctx: &RenderContext<'_>, construct: Construct<'_>) -> RenderResult<String> {
        let Construct::Service(service) = construct else {
            return Err(RenderError::MissingTemplate {
                kind: construct.kind(),
                language: "go".to_string(),
            });
        };
        debug!(name = %service.name, methods = service.methods.len(), "rendering go service");
        validate_construct(construct)?;
        ctx.resolver.check_construct(construct)?;
        let plan = ServicePlan::new(service)?;
        render_service(ctx, service, &plan).map_err(|err| err.at(&service.name))
    }
}

/// `a *int32, b *int32` for the parameters of a call.
fn signature_params(types: &GoTypeMapper<'_>, call: &MethodCall<'_>) -> RenderResult<String> {
    let params = call
        .params
        .iter()
        .map(|p| -> RenderResult<String> {
            Ok(format!("{} {}", p.member, types.format_type(&p.param.ty)?))
        })
        .collect::<RenderResult<Vec<_>>>()
        .map_err(|e| e.in_member(&call.method.name))?;
    Ok(params.join(", "))
}

/// `(*int32, error)` or `error`.
fn signature_results(types: &GoTypeMapper<'_>, call: &MethodCall<'_>) -> RenderResult<String> {
    if types.is_void(call.returns()) {
        Ok("error".to_string())
    } else {
        Ok(format!("({}, error)", types.format_type(call.returns())?))
    }
}

fn request_type(service: &Service, call: &MethodCall<'_>) -> String {
    format!("{}{}Request", service.name, call.call_type)
}

fn response_type(service: &Service, call: &MethodCall<'_>) -> String {
    format!("{}{}Response", service.name, call.call_type)
}

fn render_service(
    ctx: &RenderContext<'_>,
    service: &Service,
    plan: &ServicePlan<'_>,
) -> RenderResult<String> {
    let types = GoTypeMapper::new(ctx.resolver);
    let imports = type_imports(
        service
            .methods
            .iter()
            .flat_map(|m| std::iter::once(&m.returns).chain(m.params.iter().map(|p| &p.ty))),
    );

    let mut w = SourceWriter::new(ctx.config);
    write_preamble(&mut w, ctx, &imports)?;

    write_comment(&mut w, ctx, &service.comments);
    w.open(format!("type I{} interface", service.name));
    for call in &plan.calls {
        write_comment(&mut w, ctx, &call.method.comments);
        w.line(format!(
            "{}({}) {}",
            call.call_type,
            signature_params(&types, call)?,
            signature_results(&types, call)?
        ));
    }
    w.close()?;

    for call in &plan.calls {
        w.blank();
        write_call_types(&mut w, &types, service, call)
            .map_err(|e| e.in_member(&call.method.name))?;
    }

    w.blank();
    write_dispatcher(&mut w, &types, service, plan)?;
    w.blank();
    write_client(&mut w, &types, service, plan)?;

    w.finish()
}

fn write_call_types(
    w: &mut SourceWriter,
    types: &GoTypeMapper<'_>,
    service: &Service,
    call: &MethodCall<'_>,
) -> RenderResult<()> {
    let request = request_type(service, call);
    w.line(format!("// {} carries the arguments of {}.", request, call.member));
    w.open(format!("type {} struct", request));
    for param in &call.params {
        w.line(format!(
            "{} {} {}",
            param.exported,
            types.format_type(&param.param.ty)?,
            json_tag(&param.param.name, &param.param.ty)
        ));
    }
    w.close()?;
    w.blank();

    w.line("// Init sets default values and returns the request.");
    w.open(format!("func (req *{0}) Init() *{0}", request));
    for param in &call.params {
        w.lines(init_statements(
            types,
            &format!("req.{}", param.exported),
            &param.param.ty,
            param.param.initializer.as_ref(),
        )?);
    }
    w.line("return req");
    w.close()?;
    w.blank();

    let response = response_type(service, call);
    w.line(format!("// {} carries the result of {}.", response, call.member));
    w.open(format!("type {} struct", response));
    if !call.is_void() {
        w.line(format!(
            "Value {} {}",
            types.format_type(call.returns())?,
            json_tag("value", call.returns())
        ));
    }
    w.close()?;
    w.blank();

    w.line("// Init sets default values and returns the response.");
    w.open(format!("func (rsp *{0}) Init() *{0}", response));
    if !call.is_void() {
        w.lines(init_statements(types, "rsp.Value", call.returns(), None)?);
    }
    w.line("return rsp");
    w.close()
}

fn write_dispatcher(
    w: &mut SourceWriter,
    types: &GoTypeMapper<'_>,
    service: &Service,
    plan: &ServicePlan<'_>,
) -> RenderResult<()> {
    let name = &service.name;
    w.line(format!("// {0} dispatches calls to an I{0} implementation.", name));
    w.open(format!("type {} struct", name));
    w.line(format!("SvcObj I{} `json:\"-\"`", name));
    w.close()?;
    w.blank();

    w.line("// ServiceName returns the name of the service.");
    w.open(format!("func (s *{}) ServiceName() string", name));
    w.line(format!("return \"{}\"", name));
    w.close()?;
    w.blank();

    w.line("// Methods maps each method name to a constructor for its request.");
    w.open(format!("func (s *{}) Methods() map[string]func() interface{{}}", name));
    w.open("return map[string]func() interface{}");
    for call in &plan.calls {
        w.line(format!(
            "\"{}\": func() interface{{}} {{ return new({}).Init() }},",
            call.member,
            request_type(service, call)
        ));
    }
    w.close()?;
    w.close()?;

    for call in &plan.calls {
        w.blank();
        w.line(format!(
            "// {} invokes {} on the service implementation.",
            call.call_type, call.member
        ));
        w.open(format!(
            "func (s *{}) {}(req *{}, rsp *{}) error",
            name,
            call.call_type,
            request_type(service, call),
            response_type(service, call)
        ));
        let args = call
            .params
            .iter()
            .map(|p| format!("req.{}", p.exported))
            .collect::<Vec<_>>()
            .join(", ");
        if types.is_void(call.returns()) {
            w.line(format!("return s.SvcObj.{}({})", call.call_type, args));
        } else {
            w.line(format!("response, err := s.SvcObj.{}({})", call.call_type, args));
            w.open("if err == nil");
            w.line("rsp.Value = response");
            w.close()?;
            w.line("return err");
        }
        w.close()?;
    }
    Ok(())
}

fn write_client(
    w: &mut SourceWriter,
    types: &GoTypeMapper<'_>,
    service: &Service,
    plan: &ServicePlan<'_>,
) -> RenderResult<()> {
    let name = &service.name;
    w.line(format!("// {0}Transport delivers requests for a {0}Client.", name));
    w.open(format!("type {}Transport interface", name));
    w.line("Invoke(service string, method string, req interface{}, rsp interface{}) error");
    w.close()?;
    w.blank();

    w.line(format!("// {0}Client calls a remote {0} service.", name));
    w.open(format!("type {}Client struct", name));
    w.line(format!("Transport {}Transport", name));
    w.close()?;

    for call in &plan.calls {
        let (client, req, rsp, err) = (
            call.local("c"),
            call.local("req"),
            call.local("rsp"),
            call.local("err"),
        );
        w.blank();
        w.line(format!(
            "// {} calls {} on the remote service.",
            call.call_type, call.member
        ));
        w.open(format!(
            "func ({} *{}Client) {}({}) {}",
            client,
            name,
            call.call_type,
            signature_params(types, call)?,
            signature_results(types, call)?
        ));
        let fields = call
            .params
            .iter()
            .map(|p| format!("{}: {}", p.exported, p.member))
            .collect::<Vec<_>>()
            .join(", ");
        w.line(format!("{} := &{}{{{}}}", req, request_type(service, call), fields));
        w.line(format!("{} := new({}).Init()", rsp, response_type(service, call)));
        let invoke = format!(
            "{}.Transport.Invoke(\"{}\", \"{}\", {}, {})",
            client, name, call.member, req, rsp
        );
        if types.is_void(call.returns()) {
            w.line(format!("return {}", invoke));
        } else {
            w.line(format!("{} := {}", err, invoke));
            w.line(format!("return {}.Value, {}", rsp, err));
        }
        w.close()?;
    }
    Ok(())
}
