//! Threshold evaluation of argument graphs.
//!
//! An [`Evaluator`] answers acceptability queries for one argument set,
//! one audience, and one proof-standard assignment. Evaluation is pure:
//! queries never mutate the set, so one evaluator can be asked about
//! any number of propositions in any order.

use tracing::trace;

use crate::{Argument, ArgumentSet, Audience, ProofStandard, Proposition, Standard};

/// Weighing coefficients used by the threshold standards.
pub const DEFAULT_ALPHA: f64 = 0.4;
pub const DEFAULT_BETA: f64 = 0.3;
pub const DEFAULT_GAMMA: f64 = 0.2;

/// Decides whether propositions meet their assigned proof standards,
/// for one audience over one argument set.
#[derive(Debug, Clone)]
pub struct Evaluator {
    argument_set: ArgumentSet,
    audience: Audience,
    standards: ProofStandard,
    alpha: f64,
    beta: f64,
    gamma: f64,
}

impl Evaluator {
    pub fn new(argument_set: ArgumentSet, audience: Audience, standards: ProofStandard) -> Self {
        Self::with_thresholds(
            argument_set,
            audience,
            standards,
            DEFAULT_ALPHA,
            DEFAULT_BETA,
            DEFAULT_GAMMA,
        )
    }

    pub fn with_thresholds(
        argument_set: ArgumentSet,
        audience: Audience,
        standards: ProofStandard,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Self {
        Self {
            argument_set,
            audience,
            standards,
            alpha,
            beta,
            gamma,
        }
    }

    pub fn argument_set(&self) -> &ArgumentSet {
        &self.argument_set
    }

    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    pub fn standards(&self) -> &ProofStandard {
        &self.standards
    }

    pub fn thresholds(&self) -> (f64, f64, f64) {
        (self.alpha, self.beta, self.gamma)
    }

    /// Whether `p` meets its assigned proof standard.
    pub fn acceptable(&self, p: &Proposition) -> bool {
        self.acceptable_on_trail(p, &mut Vec::new())
    }

    /// Whether `p` clears `standard`, regardless of its assigned one.
    pub fn meets_proof_standard(&self, p: &Proposition, standard: Standard) -> bool {
        self.standard_met(p, standard, &mut Vec::new())
    }

    /// Whether some argument pro `p` is applicable.
    pub fn applicable(&self, p: &Proposition) -> bool {
        self.applicable_on_trail(p, &mut Vec::new())
    }

    /// Whether a single argument's premises hold and no exception
    /// fires, under the audience's assumptions.
    pub fn argument_applicable(&self, argument: &Argument) -> bool {
        self.argument_applicable_on_trail(argument, &mut Vec::new())
    }

    /// Audience weight of `argument`; 0.0 when unweighted.
    pub fn weight_of(&self, argument: &Argument) -> f64 {
        self.audience.weight(&argument.id)
    }

    /// Strongest weight among the applicable members of `arguments`;
    /// 0.0 when none is applicable.
    pub fn max_weight_applicable(&self, arguments: &[Argument]) -> f64 {
        self.max_applicable_on_trail(arguments, &mut Vec::new())
    }

    /// Strongest applicable argument concluding `p`.
    pub fn max_weight_pro(&self, p: &Proposition) -> f64 {
        self.max_pro(p, &mut Vec::new())
    }

    /// Strongest applicable argument concluding the negation of `p`.
    pub fn max_weight_con(&self, p: &Proposition) -> f64 {
        self.max_con(p, &mut Vec::new())
    }

    /// Every argument in the set, in insertion order.
    pub fn all_arguments(&self) -> Vec<Argument> {
        self.argument_set.arguments()
    }

    // A proposition already on the trail cannot support its own
    // evaluation; revisits report not acceptable, which keeps cyclic
    // graphs terminating.
    fn acceptable_on_trail(&self, p: &Proposition, trail: &mut Vec<Proposition>) -> bool {
        if trail.contains(p) {
            return false;
        }
        trail.push(p.clone());
        let standard = self.standards.standard_for(p);
        let verdict = self.standard_met(p, standard, trail);
        trail.pop();
        trace!(proposition = %p, standard = %standard, verdict, "acceptability");
        verdict
    }

    fn standard_met(&self, p: &Proposition, standard: Standard, trail: &mut Vec<Proposition>) -> bool {
        match standard {
            Standard::Scintilla => self.applicable_on_trail(p, trail),
            Standard::Preponderance => self.max_pro(p, trail) > self.max_con(p, trail),
            Standard::ClearAndConvincing => {
                let pro = self.max_pro(p, trail);
                let con = self.max_con(p, trail);
                pro > con && pro > self.alpha && (pro - con) > self.beta
            }
            Standard::BeyondReasonableDoubt => {
                let pro = self.max_pro(p, trail);
                let con = self.max_con(p, trail);
                pro > con && pro > self.alpha && (pro - con) > self.beta && con < self.gamma
            }
            Standard::DialecticalValidity => {
                self.applicable_on_trail(p, trail) && !self.applicable_on_trail(&p.negate(), trail)
            }
        }
    }

    fn applicable_on_trail(&self, p: &Proposition, trail: &mut Vec<Proposition>) -> bool {
        self.argument_set
            .get_arguments(p)
            .iter()
            .any(|a| self.argument_applicable_on_trail(a, trail))
    }

    fn argument_applicable_on_trail(
        &self,
        argument: &Argument,
        trail: &mut Vec<Proposition>,
    ) -> bool {
        let premises_hold = argument.premises.iter().all(|premise| {
            self.audience.assumes(premise)
                || (!self.audience.assumes(&premise.negate())
                    && self.acceptable_on_trail(premise, trail))
        });
        if !premises_hold {
            return false;
        }
        argument.exceptions.iter().all(|exception| {
            !self.audience.assumes(exception)
                && (self.audience.assumes(&exception.negate())
                    || !self.acceptable_on_trail(exception, trail))
        })
    }

    fn max_applicable_on_trail(
        &self,
        arguments: &[Argument],
        trail: &mut Vec<Proposition>,
    ) -> f64 {
        arguments
            .iter()
            .filter(|a| self.argument_applicable_on_trail(a, trail))
            .map(|a| self.weight_of(a))
            .fold(0.0, f64::max)
    }

    fn max_pro(&self, p: &Proposition, trail: &mut Vec<Proposition>) -> f64 {
        self.max_applicable_on_trail(&self.argument_set.get_arguments(p), trail)
    }

    fn max_con(&self, p: &Proposition, trail: &mut Vec<Proposition>) -> f64 {
        self.max_applicable_on_trail(&self.argument_set.get_arguments_con(p), trail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgumentId;

    fn weighed(pairs: &[(&str, f64)]) -> Audience {
        Audience::new(
            [],
            pairs
                .iter()
                .map(|(id, w)| (ArgumentId::from(*id), *w))
                .collect::<Vec<_>>(),
        )
    }

    fn pro_con_set(guilty: &Proposition) -> ArgumentSet {
        let set = ArgumentSet::new();
        set.add_argument(Argument::new("pro", guilty.clone()), None);
        set.add_argument(Argument::new("con", guilty.negate()), None);
        set
    }

    #[test]
    fn default_thresholds_are_the_fixed_triple() {
        let eval = Evaluator::new(
            ArgumentSet::new(),
            Audience::default(),
            ProofStandard::default(),
        );
        assert_eq!(eval.thresholds(), (0.4, 0.3, 0.2));
    }

    #[test]
    fn zero_premise_argument_is_always_applicable() {
        let guilty = Proposition::positive("guilty");
        let set = ArgumentSet::new();
        set.add_argument(Argument::new("a1", guilty.clone()), None);
        let eval = Evaluator::new(set, Audience::default(), ProofStandard::default());
        assert!(eval.applicable(&guilty));
        assert!(eval.acceptable(&guilty));
    }

    #[test]
    fn unsupported_premise_blocks_applicability() {
        let guilty = Proposition::positive("guilty");
        let motive = Proposition::positive("motive");
        let set = ArgumentSet::new();
        set.add_argument(Argument::new("a1", guilty.clone()).premise(motive.clone()), None);
        let eval = Evaluator::new(
            set.clone(),
            Audience::default(),
            ProofStandard::default(),
        );
        assert!(!eval.applicable(&guilty));

        let assuming = Evaluator::new(set, Audience::new([motive], []), ProofStandard::default());
        assert!(assuming.applicable(&guilty));
    }

    #[test]
    fn assumed_negation_of_premise_blocks_applicability() {
        let guilty = Proposition::positive("guilty");
        let motive = Proposition::positive("motive");
        let set = ArgumentSet::new();
        set.add_argument(
            Argument::new("a1", guilty.clone()).premise(motive.clone()),
            None,
        );
        // motive itself has support, but the audience assumes -motive
        set.add_argument(Argument::new("a2", motive.clone()), None);
        let eval = Evaluator::new(
            set,
            Audience::new([motive.negate()], []),
            ProofStandard::default(),
        );
        assert!(!eval.applicable(&guilty));
    }

    #[test]
    fn acceptable_premise_satisfies_an_argument() {
        let guilty = Proposition::positive("guilty");
        let motive = Proposition::positive("motive");
        let set = ArgumentSet::new();
        set.add_argument(
            Argument::new("a1", guilty.clone()).premise(motive.clone()),
            None,
        );
        set.add_argument(Argument::new("a2", motive), None);
        let eval = Evaluator::new(set, Audience::default(), ProofStandard::default());
        assert!(eval.acceptable(&guilty));
    }

    #[test]
    fn assumed_exception_defeats_an_argument() {
        let guilty = Proposition::positive("guilty");
        let alibi = Proposition::positive("alibi");
        let set = ArgumentSet::new();
        set.add_argument(
            Argument::new("a1", guilty.clone()).exception(alibi.clone()),
            None,
        );
        let eval = Evaluator::new(
            set.clone(),
            Audience::new([alibi.clone()], []),
            ProofStandard::default(),
        );
        assert!(!eval.applicable(&guilty));

        // the exception's negation being assumed clears it even if the
        // exception would otherwise be acceptable
        set.add_argument(Argument::new("a2", alibi.clone()), None);
        let cleared = Evaluator::new(
            set,
            Audience::new([alibi.negate()], []),
            ProofStandard::default(),
        );
        assert!(cleared.applicable(&guilty));
    }

    #[test]
    fn preponderance_requires_a_strict_margin() {
        let guilty = Proposition::positive("guilty");
        let set = pro_con_set(&guilty);
        let standards = ProofStandard::new([(guilty.clone(), Standard::Preponderance)]);

        let tied = Evaluator::new(
            set.clone(),
            weighed(&[("pro", 0.5), ("con", 0.5)]),
            standards.clone(),
        );
        assert!(!tied.acceptable(&guilty));

        let ahead = Evaluator::new(set, weighed(&[("pro", 0.6), ("con", 0.5)]), standards);
        assert!(ahead.acceptable(&guilty));
    }

    #[test]
    fn clear_and_convincing_needs_strength_and_margin() {
        let guilty = Proposition::positive("guilty");
        let set = pro_con_set(&guilty);

        // margin 0.35 > beta, strength 0.45 > alpha
        let eval = Evaluator::new(set.clone(), weighed(&[("pro", 0.45), ("con", 0.1)]), ProofStandard::default());
        assert!(eval.meets_proof_standard(&guilty, Standard::ClearAndConvincing));

        // margin 0.25 < beta
        let narrow = Evaluator::new(set.clone(), weighed(&[("pro", 0.45), ("con", 0.2)]), ProofStandard::default());
        assert!(!narrow.meets_proof_standard(&guilty, Standard::ClearAndConvincing));

        // strength 0.35 < alpha even with a full margin
        let weak = Evaluator::new(set, weighed(&[("pro", 0.35), ("con", 0.0)]), ProofStandard::default());
        assert!(!weak.meets_proof_standard(&guilty, Standard::ClearAndConvincing));
    }

    #[test]
    fn beyond_reasonable_doubt_requires_weak_opposition() {
        let guilty = Proposition::positive("guilty");
        let set = pro_con_set(&guilty);

        let doubtful = Evaluator::new(
            set.clone(),
            weighed(&[("pro", 0.9), ("con", 0.25)]),
            ProofStandard::default(),
        );
        assert!(doubtful.meets_proof_standard(&guilty, Standard::ClearAndConvincing));
        assert!(!doubtful.meets_proof_standard(&guilty, Standard::BeyondReasonableDoubt));

        let certain = Evaluator::new(
            set,
            weighed(&[("pro", 0.9), ("con", 0.1)]),
            ProofStandard::default(),
        );
        assert!(certain.meets_proof_standard(&guilty, Standard::BeyondReasonableDoubt));
    }

    #[test]
    fn dialectical_validity_tolerates_no_applicable_con() {
        let guilty = Proposition::positive("guilty");
        let set = pro_con_set(&guilty);
        let eval = Evaluator::new(
            set,
            weighed(&[("pro", 0.9), ("con", 0.1)]),
            ProofStandard::default(),
        );
        assert!(!eval.meets_proof_standard(&guilty, Standard::DialecticalValidity));

        let unopposed = ArgumentSet::new();
        unopposed.add_argument(Argument::new("pro", guilty.clone()), None);
        let eval = Evaluator::new(unopposed, Audience::default(), ProofStandard::default());
        assert!(eval.meets_proof_standard(&guilty, Standard::DialecticalValidity));
    }

    #[test]
    fn max_weights_ignore_inapplicable_arguments() {
        let guilty = Proposition::positive("guilty");
        let motive = Proposition::positive("motive");
        let set = ArgumentSet::new();
        set.add_argument(Argument::new("weak", guilty.clone()), None);
        // stronger but blocked on an unsupported premise
        set.add_argument(
            Argument::new("strong", guilty.clone()).premise(motive),
            None,
        );
        let eval = Evaluator::new(
            set,
            weighed(&[("weak", 0.3), ("strong", 0.9)]),
            ProofStandard::default(),
        );
        assert_eq!(eval.max_weight_pro(&guilty), 0.3);
        assert_eq!(eval.max_weight_con(&guilty), 0.0);
    }

    #[test]
    fn max_weight_applicable_over_explicit_collection() {
        let guilty = Proposition::positive("guilty");
        let set = pro_con_set(&guilty);
        let eval = Evaluator::new(
            set,
            weighed(&[("pro", 0.4), ("con", 0.8)]),
            ProofStandard::default(),
        );
        let all = eval.all_arguments();
        assert_eq!(eval.max_weight_applicable(&all), 0.8);
        assert_eq!(eval.max_weight_applicable(&[]), 0.0);
    }

    #[test]
    fn cyclic_support_terminates_unaccepted() {
        let rains = Proposition::positive("rains");
        let pours = Proposition::positive("pours");
        let set = ArgumentSet::new();
        set.add_argument(
            Argument::new("a1", rains.clone()).premise(pours.clone()),
            None,
        );
        set.add_argument(Argument::new("a2", pours.clone()).premise(rains.clone()), None);
        let eval = Evaluator::new(set, Audience::default(), ProofStandard::default());
        assert!(!eval.acceptable(&rains));
        assert!(!eval.acceptable(&pours));
    }
}
