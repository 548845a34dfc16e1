//! Cognitive load optimization
//!
//! Restructures a solution so a reader can take it in: complex requests are
//! broken into at most seven named components (Miller's 7±2), simple ones
//! with a high reality level get a banner naming the underlying mechanism.

use tracing::debug;

use crate::types::Constraint;

/// Upper bound on components in a chunked answer
pub const MAX_COMPONENTS: usize = 7;

/// Contexts longer than this many words are chunked
const MAX_CONTEXT_WORDS: usize = 15;

/// Bodies longer than this many lines are chunked
const MAX_BODY_LINES: usize = 7;

/// Reality levels above this get a banner
const BANNER_REALITY_LEVEL: f64 = 0.8;

const COMPLEXITY_KEYWORDS: &[&str] = &["microservice", "architecture", "complex", "multiple", "many"];

const DEFAULT_COMPONENTS: &[&str] = &["Architecture", "Implementation", "Configuration"];

/// A named component and the request keywords that select it
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl ComponentRule {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|k| text_lower.contains(k.as_str()))
    }
}

fn builtin_components() -> Vec<ComponentRule> {
    vec![
        ComponentRule::new("Authentication", &["auth", "login", "security", "permission"]),
        ComponentRule::new("Performance", &["caching", "performance", "optimization", "speed"]),
        ComponentRule::new("Monitoring", &["monitoring", "logging", "tracking", "metrics"]),
        ComponentRule::new("Infrastructure", &["load balancing", "database", "sharding", "scaling"]),
        ComponentRule::new("Communication", &["message queuing", "distributed", "microservice"]),
        ComponentRule::new("Observability", &["tracing", "debugging", "error handling"]),
    ]
}

/// Pure text transform with one sticky diagnostic flag
pub struct CognitiveOptimizer {
    components: Vec<ComponentRule>,
    chunking_applied: bool,
}

impl CognitiveOptimizer {
    pub fn new() -> Self {
        Self::with_components(builtin_components())
    }

    /// Use a custom component table; declaration order is output order
    pub fn with_components(components: Vec<ComponentRule>) -> Self {
        Self {
            components,
            chunking_applied: false,
        }
    }

    /// Restructure `body` for the request described by `constraint`
    pub fn optimize(&mut self, body: &str, constraint: &Constraint) -> String {
        if needs_chunking(body, &constraint.context) {
            self.chunking_applied = true;
            return self.chunk(&constraint.context);
        }

        if constraint.reality_level > BANNER_REALITY_LEVEL {
            return format!("🔥 REALITY CONSTRAINT: {}\n\n{}", constraint.causal_mechanism, body);
        }

        body.to_string()
    }

    /// Whether any call so far produced a chunked answer
    pub fn chunking_applied(&self) -> bool {
        self.chunking_applied
    }

    /// Components selected for a request, capped at `MAX_COMPONENTS`
    pub fn components_for(&self, request: &str) -> Vec<String> {
        let request_lower = request.to_lowercase();
        let mut components: Vec<String> = self
            .components
            .iter()
            .filter(|rule| rule.matches(&request_lower))
            .map(|rule| rule.name.clone())
            .collect();

        if components.is_empty() {
            components = DEFAULT_COMPONENTS.iter().map(|c| c.to_string()).collect();
        }
        components.truncate(MAX_COMPONENTS);
        components
    }

    fn chunk(&self, request: &str) -> String {
        let components = self.components_for(request);
        debug!("Chunking answer into {} components", components.len());

        let mut result = String::with_capacity(256 + components.len() * 160);
        result.push_str("🧠 COGNITIVE OPTIMIZATION APPLIED\n");
        result.push_str(&format!(
            "Breaking down complex system into {} manageable components:\n\n",
            components.len()
        ));

        for (i, component) in components.iter().enumerate() {
            result.push_str(&format!("**{}. {}**\n", i + 1, component));
            result.push_str(&format!(
                "   - Implementation strategy for {}\n",
                component.to_lowercase()
            ));
            result.push_str("   - Integration points with other components\n");
            result.push_str("   - Performance and security considerations\n\n");
        }

        result.push_str("💡 **Next Steps:**\n");
        result.push_str("1. Implement components in order of dependency\n");
        result.push_str("2. Test each component individually before integration\n");
        result.push_str("3. Monitor system performance at each stage\n");
        result
    }
}

impl Default for CognitiveOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

fn needs_chunking(body: &str, context: &str) -> bool {
    let context_lower = context.to_lowercase();
    context.split_whitespace().count() > MAX_CONTEXT_WORDS
        || COMPLEXITY_KEYWORDS.iter().any(|k| context_lower.contains(k))
        || body.split('\n').count() > MAX_BODY_LINES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConstraintType;

    const ENTERPRISE_REQUEST: &str = "Design complete microservice architecture with authentication, \
        caching, monitoring, logging, error handling, rate limiting, load balancing, database \
        sharding, message queuing, and distributed tracing for enterprise scale";

    fn constraint(constraint_type: ConstraintType, reality: f64, context: &str) -> Constraint {
        Constraint::new(constraint_type, reality, context, "Hardware limitation")
    }

    #[test]
    fn test_complex_request_is_chunked() {
        let mut optimizer = CognitiveOptimizer::new();
        let c = constraint(ConstraintType::CognitiveLoad, 0.9, ENTERPRISE_REQUEST);
        let result = optimizer.optimize("Simple solution", &c);

        assert!(result.starts_with("🧠 COGNITIVE OPTIMIZATION APPLIED\n"));
        assert!(result.contains("into 6 manageable components"));
        assert!(result.contains("**1. Authentication**"));
        assert!(result.contains("**6. Observability**"));
        assert!(result.contains("   - Implementation strategy for monitoring\n"));
        assert!(result.ends_with("3. Monitor system performance at each stage\n"));
        assert!(optimizer.chunking_applied());
    }

    #[test]
    fn test_reality_banner() {
        let mut optimizer = CognitiveOptimizer::new();
        let c = constraint(ConstraintType::Memory, 0.95, "memory optimization");
        let result = optimizer.optimize("Optimize memory usage", &c);

        assert_eq!(result, "🔥 REALITY CONSTRAINT: Hardware limitation\n\nOptimize memory usage");
        assert!(!optimizer.chunking_applied());
    }

    #[test]
    fn test_low_reality_passes_through() {
        let mut optimizer = CognitiveOptimizer::new();
        let c = constraint(ConstraintType::Scalability, 0.8, "scale it");
        assert_eq!(optimizer.optimize("body", &c), "body");
    }

    #[test]
    fn test_word_count_trigger() {
        let mut optimizer = CognitiveOptimizer::new();
        let sixteen_words = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen";
        let c = constraint(ConstraintType::Artificial, 0.3, sixteen_words);
        let result = optimizer.optimize("body", &c);
        assert!(result.contains("into 3 manageable components"));
        assert!(result.contains("**1. Architecture**"));
        assert!(result.contains("**3. Configuration**"));

        let fifteen_words = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen";
        let c = constraint(ConstraintType::Artificial, 0.3, fifteen_words);
        assert_eq!(optimizer.optimize("body", &c), "body");
    }

    #[test]
    fn test_line_count_trigger() {
        let mut optimizer = CognitiveOptimizer::new();
        let c = constraint(ConstraintType::Artificial, 0.3, "short login request");
        let eight_lines = "a\nb\nc\nd\ne\nf\ng\nh";
        let result = optimizer.optimize(eight_lines, &c);
        assert!(result.contains("**1. Authentication**"));
        assert!(result.contains("into 1 manageable components"));
    }

    #[test]
    fn test_component_list_capped() {
        let components: Vec<ComponentRule> = (1..=9)
            .map(|i| ComponentRule::new(&format!("Part{}", i), &[&format!("kw{}", i)]))
            .collect();
        let mut optimizer = CognitiveOptimizer::with_components(components);
        let request = "complex kw1 kw2 kw3 kw4 kw5 kw6 kw7 kw8 kw9";

        assert_eq!(optimizer.components_for(request).len(), MAX_COMPONENTS);

        let c = constraint(ConstraintType::CognitiveLoad, 0.9, request);
        let result = optimizer.optimize("body", &c);
        assert!(result.contains("into 7 manageable components"));
        assert!(result.contains("**7. Part7**"));
        assert!(!result.contains("Part8"));
    }

    #[test]
    fn test_components_keep_declaration_order() {
        let optimizer = CognitiveOptimizer::new();
        let components = optimizer.components_for("tracing first, then login");
        assert_eq!(components, vec!["Authentication".to_string(), "Observability".to_string()]);
    }
}
