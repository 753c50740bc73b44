use crate::ast::Value;

/// Bound values for one parameterized render.
///
/// Placeholders are handed out in bind order starting at `start`, so
/// `values()[i]` belongs to placeholder `$(start + i)`.
#[derive(Debug)]
pub struct ParamContext {
    /// Index the next placeholder will carry
    next: usize,
    /// Collected parameter values in order
    params: Vec<Value>,
}

impl ParamContext {
    pub fn new(start: usize) -> Self {
        Self {
            next: start,
            params: Vec::new(),
        }
    }

    /// Add a value and return the placeholder for it.
    pub fn bind(&mut self, value: Value) -> String {
        let placeholder = format!("${}", self.next);
        self.next += 1;
        self.params.push(value);
        placeholder
    }

    pub fn values(&self) -> &[Value] {
        &self.params
    }

    pub fn into_values(self) -> Vec<Value> {
        self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Default for ParamContext {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_follow_bind_order() {
        let mut ctx = ParamContext::default();
        assert_eq!(ctx.bind(Value::from(1)), "$1");
        assert_eq!(ctx.bind(Value::from("x")), "$2");
        assert_eq!(ctx.values(), &[Value::Int(1), Value::String("x".into())]);
    }

    #[test]
    fn test_custom_start() {
        let mut ctx = ParamContext::new(5);
        assert!(ctx.is_empty());
        assert_eq!(ctx.bind(Value::Null), "$5");
        assert_eq!(ctx.bind(Value::Bool(true)), "$6");
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.into_values(), vec![Value::Null, Value::Bool(true)]);
    }
}
