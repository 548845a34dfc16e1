//! Canned solution templates per constraint category

use crate::types::{Constraint, ConstraintType};

const SECURITY_SOLUTION: &str = "🔐 SECURITY-ALIGNED SOLUTION:
- Multi-factor authentication implementation
- JWT token management with refresh rotation
- Rate limiting: 10 requests/minute per IP
- Input validation and sanitization
- HTTPS enforcement with security headers
- Audit logging for compliance requirements";

const SCALABILITY_SOLUTION: &str = ">> SCALABILITY-OPTIMIZED SOLUTION:
- Horizontal scaling with load balancing
- Database connection pooling
- Redis caching for frequent queries
- CDN integration for static assets
- Microservice architecture patterns
- Auto-scaling based on metrics";

const MEMORY_SOLUTION: &str = ">> MEMORY-OPTIMIZED SOLUTION:
- Object pooling for frequent allocations
- Lazy loading for large datasets
- Memory profiling and leak detection
- Garbage collection optimization
- Efficient data structures selection
- Memory-mapped file handling";

const LATENCY_SOLUTION: &str = "⚡ LATENCY-OPTIMIZED SOLUTION:
- Connection keep-alive optimization
- Database query optimization with indexing
- Async processing for non-blocking operations
- Content compression and minification
- Edge caching strategies
- Performance monitoring integration";

/// Fresh solution text for a constraint with no confident learned pattern
pub fn generate_solution(constraint: &Constraint) -> String {
    match constraint.constraint_type {
        ConstraintType::Security => SECURITY_SOLUTION.to_string(),
        ConstraintType::Scalability => SCALABILITY_SOLUTION.to_string(),
        ConstraintType::Memory => MEMORY_SOLUTION.to_string(),
        ConstraintType::Latency => LATENCY_SOLUTION.to_string(),
        ConstraintType::CognitiveLoad | ConstraintType::Artificial => adaptive_solution(constraint),
    }
}

fn adaptive_solution(constraint: &Constraint) -> String {
    format!(
        "🛠️ ADAPTIVE SOLUTION for {}:
Reality Level: {:.1}%
Constraint Mechanism: {}

Generated approach:
- Context-aware implementation strategy
- Performance and security considerations
- Integration with existing systems
- Monitoring and maintenance protocols
- Future scalability provisions",
        constraint.constraint_type.as_str().to_uppercase(),
        constraint.reality_level * 100.0,
        constraint.causal_mechanism
    )
}
