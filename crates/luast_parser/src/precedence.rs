//! Binary operator binding powers and tree assembly.

use luast_ast::operator::BinaryOperator;

/// How strongly an operator holds the operands on either side of it.
/// An operator whose left power exceeds its right power associates to the
/// right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPower {
    pub left: u8,
    pub right: u8,
}

impl BindingPower {
    #[inline]
    pub fn is_right_associative(self) -> bool {
        self.left > self.right
    }
}

/// Binding powers from weakest (`or`) to strongest (`^`).
pub fn binding_power(operator: BinaryOperator) -> BindingPower {
    use BinaryOperator::*;

    let (left, right) = match operator {
        Or => (1, 1),
        And => (2, 2),
        Less | Greater | LessEqual | GreaterEqual | NotEqual | Equal => (3, 3),
        Concat => (4, 4),
        Add | Subtract => (5, 5),
        Multiply | Divide | Modulo => (6, 6),
        Power => (8, 7),
    };
    BindingPower { left, right }
}

/// Index of the operator that binds first: the highest left power, the
/// right-most among equals for right-associative operators and the
/// left-most otherwise.
pub(crate) fn strongest_operator(operators: &[BinaryOperator]) -> usize {
    let mut best = 0;
    for (i, &operator) in operators.iter().enumerate().skip(1) {
        let power = binding_power(operator);
        let best_power = binding_power(operators[best]);
        if power.left > best_power.left || (power.left == best_power.left && power.is_right_associative()) {
            best = i;
        }
    }
    best
}

/// Turn `first op1 x1 op2 x2 ...` into a single tree by fusing the
/// strongest pending operator with its neighbours until one operand is left.
pub(crate) fn fold_operators<T>(
    first: T,
    rest: Vec<(BinaryOperator, T)>,
    mut combine: impl FnMut(T, BinaryOperator, T) -> T,
) -> T {
    let mut operands = Vec::with_capacity(rest.len() + 1);
    let mut operators = Vec::with_capacity(rest.len());
    operands.push(first);
    for (operator, operand) in rest {
        operators.push(operator);
        operands.push(operand);
    }

    while !operators.is_empty() {
        let i = strongest_operator(&operators);
        let operator = operators.remove(i);
        let right = operands.remove(i + 1);
        let left = operands.remove(i);
        operands.insert(i, combine(left, operator, right));
    }
    // operands always holds one more element than operators
    operands.swap_remove(0)
}
