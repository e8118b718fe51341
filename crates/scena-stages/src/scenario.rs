//! Scenario tables: declaration at load time, expansion per call.
//!
//! ```text
//! header ─► ScenarioHeader ─► registry
//!                                │
//! call ─► CallBinding ─► expand_body ─► child interpreter (ScenarioContext)
//!                                           │
//!                           assertions + no-op roll-up ─► calling row
//! ```

use crate::aggregator::ScenarioContext;
use crate::binder::CallBinding;
use crate::expectation::ScenarioExpectation;
use crate::templater;
use scena_core::{
    Assertion, CallSite, ChildSpec, Instruction, Result, Scenario, Table, TestContext,
};
use scena_in::{InvocationMatcher, ScenarioHeader};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A parsed scenario table
#[derive(Debug)]
pub struct ScenarioTable {
    table_id: String,
    table: Table,
    header: ScenarioHeader,
    matcher: Option<InvocationMatcher>,
}

impl ScenarioTable {
    /// Parse the header and register the scenario with `context`.
    ///
    /// A same-named scenario already in the registry is replaced for later
    /// lookups.
    pub fn parse(table: Table, table_id: &str, context: &dyn TestContext) -> Result<Rc<Self>> {
        let header = ScenarioHeader::parse(&table)?;
        let matcher = header.invocation_matcher()?;
        let scenario = Rc::new(ScenarioTable {
            table_id: table_id.to_string(),
            table,
            header,
            matcher,
        });

        tracing::debug!(scenario = %scenario.header.name, table_id, "registering scenario");
        context.add_scenario(&scenario.header.name, Rc::clone(&scenario) as Rc<dyn Scenario>);
        Ok(scenario)
    }

    /// A scenario table contributes no assertions where it is declared
    pub fn assertions(&self) -> Vec<Assertion> {
        Vec::new()
    }

    pub fn header(&self) -> &ScenarioHeader {
        &self.header
    }

    pub fn is_parameterized(&self) -> bool {
        self.header.parameterized
    }

    /// The declared body, header row included
    pub fn body(&self) -> &Table {
        &self.table
    }

    /// Expand the body for one call and collect its assertions, followed by
    /// the roll-up assertion for the calling row.
    pub fn call(&self, binding: &CallBinding, site: &CallSite) -> Result<Vec<Assertion>> {
        let expanded = templater::expand_body(&self.table, &self.header.inputs, binding)?;

        let call_id = self.call_id(site);
        let context = Rc::new(ScenarioContext::new(Rc::clone(&site.context)));
        let kind = site.factory.child_kind_for(&site.kind);
        tracing::debug!(
            scenario = %self.header.name,
            call = %call_id,
            child_kind = %kind,
            "expanding scenario"
        );

        let mut child = site.factory.create(ChildSpec {
            kind,
            table: expanded.shared(),
            table_id: call_id.clone(),
            parent: Some(Rc::clone(&site.table)),
            context: Rc::clone(&context) as Rc<dyn TestContext>,
            factory: Rc::clone(&site.factory),
        })?;
        site.table.borrow_mut().add_child_table(child.table(), site.row);

        let mut assertions = child.assertions()?;
        let instruction = Instruction::noop(format!("{}_rollup", call_id));
        assertions.push(Assertion::new(
            instruction,
            Box::new(ScenarioExpectation::new(
                child,
                context,
                site.row,
                !self.header.outputs.is_empty(),
            )),
        ));
        Ok(assertions)
    }

    /// Id of the expanded body for one call: calling table and row, then
    /// this scenario's table. Nested calls extend the caller's id.
    fn call_id(&self, site: &CallSite) -> String {
        format!("{}_{}/{}", site.table_id, site.row, self.table_id)
    }
}

impl Scenario for ScenarioTable {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn inputs(&self) -> &[String] {
        &self.header.inputs
    }

    fn outputs(&self) -> &HashSet<String> {
        &self.header.outputs
    }

    fn match_parameters(&self, phrase: &str) -> Option<Vec<String>> {
        self.matcher.as_ref()?.captures(phrase)
    }

    fn call_named(&self, args: &HashMap<String, String>, site: &CallSite) -> Result<Vec<Assertion>> {
        let binding = CallBinding::named(&self.header.inputs, args)?;
        self.call(&binding, site)
    }

    fn call_positional(&self, args: &[String], site: &CallSite) -> Result<Vec<Assertion>> {
        let binding = CallBinding::positional(&self.header.inputs, args);
        self.call(&binding, site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scena_core::{
        AssertionRunner, ChildInterpreter, DocumentContext, ExecutionResult, Expectation,
        FixtureInvoker, InterpreterFactory, ReturnValue, ScenaError, SharedTable, TableKind,
        TestSummary,
    };

    /// Body rows name the outcome they report: `pass`, `fail`, `error`, `ignore`
    struct Scripted {
        kind: TableKind,
        table: SharedTable,
        parent: Option<SharedTable>,
        context: Rc<dyn TestContext>,
    }

    struct Report(ExecutionResult, Rc<dyn TestContext>);

    impl Expectation for Report {
        fn evaluate(&self, _returned: &ReturnValue) -> Option<ExecutionResult> {
            self.1.increment(self.0);
            Some(self.0)
        }
    }

    impl ChildInterpreter for Scripted {
        fn kind(&self) -> &TableKind {
            &self.kind
        }
        fn table(&self) -> SharedTable {
            Rc::clone(&self.table)
        }
        fn parent_table(&self) -> Option<SharedTable> {
            self.parent.clone()
        }
        fn context(&self) -> Rc<dyn TestContext> {
            Rc::clone(&self.context)
        }
        fn assertions(&mut self) -> Result<Vec<Assertion>> {
            let table = self.table.borrow();
            let mut assertions = Vec::new();
            for row in 1..table.row_count() {
                let cells = table.row(row).unwrap_or_default().to_vec();
                let result = match cells[0].as_str() {
                    "fail" => ExecutionResult::Fail,
                    "error" => ExecutionResult::Error,
                    "ignore" => ExecutionResult::Ignore,
                    _ => ExecutionResult::Pass,
                };
                assertions.push(Assertion::new(
                    Instruction::call(format!("{}_{}", self.kind, row), "fake", "row", cells),
                    Box::new(Report(result, Rc::clone(&self.context))),
                ));
            }
            Ok(assertions)
        }
    }

    fn build_scripted(spec: ChildSpec) -> Result<Box<dyn ChildInterpreter>> {
        Ok(Box::new(Scripted {
            kind: spec.kind,
            table: spec.table,
            parent: spec.parent,
            context: spec.context,
        }))
    }

    struct Silent;

    impl FixtureInvoker for Silent {
        fn invoke(&mut self, _instruction: &Instruction) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn site(kind: &str, context: &Rc<DocumentContext>) -> CallSite {
        let factory = InterpreterFactory::new()
            .with("script", build_scripted)
            .with("story", build_scripted);
        CallSite {
            table: Table::from_rows(vec![vec!["script"], vec!["call"]]).shared(),
            table_id: "caller".to_string(),
            kind: kind.into(),
            row: 1,
            context: Rc::clone(context) as Rc<dyn TestContext>,
            factory: Rc::new(factory),
        }
    }

    fn scenario(rows: Vec<Vec<&str>>, context: &Rc<DocumentContext>) -> Rc<ScenarioTable> {
        ScenarioTable::parse(Table::from_rows(rows), "scenario_0", context.as_ref()).unwrap()
    }

    fn run(assertions: Vec<Assertion>) {
        AssertionRunner::new(assertions).run(&mut Silent);
    }

    #[test]
    fn test_parse_registers_and_adds_no_assertions() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(vec![vec!["scenario", "add _ and _", "x,y"]], &ctx);

        assert!(s.assertions().is_empty());
        assert!(s.is_parameterized());
        assert_eq!(ctx.scenario("AddAnd").unwrap().inputs(), &["x", "y"]);
    }

    #[test]
    fn test_malformed_header_registers_nothing() {
        let ctx = Rc::new(DocumentContext::new());
        let err = ScenarioTable::parse(Table::from_rows(vec![vec!["scenario"]]), "s", ctx.as_ref())
            .unwrap_err();
        assert!(matches!(err, ScenaError::Syntax(_)));
        assert!(ctx.scenarios().is_empty());
    }

    #[test]
    fn test_call_substitutes_and_appends_rollup() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(
            vec![vec!["scenario", "add _ and _", "x,y"], vec!["pass", "@x + @{y}"]],
            &ctx,
        );
        let site = site("script", &ctx);

        let assertions = s.call_positional(&["3".into(), "4".into()], &site).unwrap();
        assert_eq!(assertions.len(), 2);
        match &assertions[0].instruction {
            Instruction::Call { args, .. } => assert_eq!(args[1], "3 + 4"),
            other => panic!("unexpected instruction {:?}", other),
        }
        assert!(assertions[1].instruction.is_noop());
        assert_eq!(assertions[1].instruction.id(), "caller_1/scenario_0_rollup");
        assert_eq!(site.table.borrow().child_tables(1).len(), 1);
        assert_eq!(s.body().cell(1, 1), Some("@x + @{y}"));
    }

    #[test]
    fn test_rollup_marks_row_without_outputs_even_on_pass() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(vec![vec!["scenario", "greet"], vec!["pass"]], &ctx);
        let site = site("script", &ctx);

        run(s.call_positional(&[], &site).unwrap());
        assert_eq!(site.table.borrow().row_result(1), Some(ExecutionResult::Pass));
    }

    #[test]
    fn test_rollup_leaves_row_alone_when_outputs_pass() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(vec![vec!["scenario", "sum _", "x, total?"], vec!["pass"]], &ctx);
        let site = site("script", &ctx);

        run(s.call_positional(&["1".into()], &site).unwrap());
        assert_eq!(site.table.borrow().row_result(1), None);
    }

    #[test]
    fn test_rollup_marks_failure_despite_outputs() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(
            vec![vec!["scenario", "sum _", "x, total?"], vec!["pass"], vec!["fail"]],
            &ctx,
        );
        let site = site("script", &ctx);

        run(s.call_positional(&["1".into()], &site).unwrap());
        assert_eq!(site.table.borrow().row_result(1), Some(ExecutionResult::Fail));
        assert_eq!(ctx.summary(), TestSummary::new(1, 1, 0, 0));
    }

    #[test]
    fn test_rollup_reports_error_over_fail() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(
            vec![vec!["scenario", "risky"], vec!["fail"], vec!["error"], vec!["ignore"]],
            &ctx,
        );
        let site = site("script", &ctx);

        run(s.call_positional(&[], &site).unwrap());
        assert_eq!(site.table.borrow().row_result(1), Some(ExecutionResult::Error));
    }

    #[test]
    fn test_named_call_rejects_undeclared_argument() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(vec![vec!["scenario", "add _ and _", "x,y"], vec!["pass", "@x"]], &ctx);
        let site = site("script", &ctx);
        let args = HashMap::from([("x".to_string(), "1".to_string()), ("z".to_string(), "2".to_string())]);

        let err = s.call_named(&args, &site).unwrap_err();
        assert_eq!(err, ScenaError::syntax("The argument z is not an input to the scenario."));
        assert!(site.table.borrow().child_tables(1).is_empty());
    }

    #[test]
    fn test_child_kind_follows_caller_or_default() {
        let ctx = Rc::new(DocumentContext::new());
        let s = scenario(vec![vec!["scenario", "greet"], vec!["pass"]], &ctx);

        let story = s.call_positional(&[], &site("story", &ctx)).unwrap();
        assert!(story[0].instruction.id().starts_with("story_"));

        let decision = s.call_positional(&[], &site("decision", &ctx)).unwrap();
        assert!(decision[0].instruction.id().starts_with("script_"));
    }

    #[test]
    fn test_redefinition_only_affects_later_lookups() {
        let ctx = Rc::new(DocumentContext::new());
        scenario(vec![vec!["scenario", "greet"], vec!["pass"]], &ctx);
        let resolved = ctx.scenario("Greet").unwrap();

        scenario(vec![vec!["scenario", "greet"], vec!["fail"], vec!["fail"]], &ctx);
        let site = site("script", &ctx);

        assert_eq!(resolved.call_positional(&[], &site).unwrap().len(), 2);
        let latest = ctx.scenario("Greet").unwrap();
        assert_eq!(latest.call_positional(&[], &site).unwrap().len(), 3);
    }
}
