use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, SuperData, ThisData, UnaryData, VariableData,
};
use crate::literal::Literal;
use crate::stmt::{
    BlockData, BreakData, ClassData, ExpressionData, FunctionData, IfData, ReturnData, Stmt,
    StmtVisitor, VarData, WhileData,
};

/// Renders an expression as a fully parenthesized Lisp-ish string, e.g.
/// `(+ 1 (* 2 3))`. Used only for debugging the parser by hand.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";
            string
        }
    };
}

pub struct ASTPrinter;

impl ASTPrinter {
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.to_string()
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> String {
        parenthesize!(self, &data.operator.lexeme, &data.left, &data.right)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> String {
        parenthesize!(self, &data.operator.lexeme, &data.expr)
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> String {
        parenthesize!(self, &data.operator.lexeme, &data.left, &data.right)
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> String {
        parenthesize!(self, "group", data.expr)
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> String {
        data.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> String {
        parenthesize!(self, format!("= {}", &data.name.lexeme).as_str(), data.value)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> String {
        let mut string = data.callee.accept(self);
        string += "(";
        for arg in &data.arguments {
            string += &arg.accept(self);
            string += " ";
        }
        let string = string.trim_end().to_string();
        format!("{string})")
    }

    fn visit_get_expr(&mut self, data: &GetData) -> String {
        format!("(. {} {})", data.object.accept(self), data.name.lexeme)
    }

    fn visit_set_expr(&mut self, data: &SetData) -> String {
        format!(
            "(.= {} {} {})",
            data.object.accept(self),
            data.name.lexeme,
            data.value.accept(self)
        )
    }

    fn visit_this_expr(&mut self, _data: &ThisData) -> String {
        "this".to_string()
    }

    fn visit_super_expr(&mut self, data: &SuperData) -> String {
        format!("(super.{})", data.method.lexeme)
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_expression_stmt(&mut self, data: &ExpressionData) -> String {
        parenthesize!(self, "expr", data.expr)
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> String {
        let params = data
            .params
            .iter()
            .map(|p| p.lexeme.clone())
            .collect::<Vec<_>>()
            .join(" ");
        let body = data
            .body
            .iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<_>>()
            .join(" ");
        format!("(fun {}({}) {{ {} }})", data.name.lexeme, params, body)
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> String {
        let mut string = format!(
            "(if {} {}",
            data.condition.accept(self),
            data.then_branch.accept(self)
        );
        if let Some(else_branch) = &data.else_branch {
            string += " else ";
            string += &else_branch.accept(self);
        }
        string += ")";
        string
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> String {
        let mut string = format!("(var {}", data.name.lexeme);
        if let Some(initializer) = &data.initializer {
            string += " = ";
            string += &initializer.accept(self);
        }
        string += ")";
        string
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> String {
        parenthesize!(self, "while", data.condition, data.body)
    }

    fn visit_break_stmt(&mut self, _data: &BreakData) -> String {
        "(break)".to_string()
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> String {
        match &data.value {
            Some(value) => format!("(return {})", value.accept(self)),
            None => "(return)".to_string(),
        }
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> String {
        let methods = data
            .methods
            .iter()
            .map(|m| self.visit_function_stmt(m))
            .collect::<Vec<_>>()
            .join(" ");
        match &data.superclass {
            Some(superclass) => format!(
                "(class {} < {} {{ {} }})",
                data.name.lexeme,
                superclass.accept(self),
                methods
            ),
            None => format!("(class {} {{ {} }})", data.name.lexeme, methods),
        }
    }

    fn visit_block_stmt(&mut self, data: &BlockData) -> String {
        let mut string = "{".to_string();
        for stmt in &data.statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";
        string
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Location, Token, Type};

    fn tok(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, Location::new(0, 0))
    }

    #[test]
    fn prints_binary_expression() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::Number(1.0))),
            operator: tok(Type::Plus, "+"),
            right: Box::new(Expr::Literal(Literal::Number(2.0))),
        });
        assert_eq!(ASTPrinter.print_expr(&expr), "(+ 1 2)");
    }

    #[test]
    fn prints_grouping() {
        let expr = Expr::Grouping(GroupingData {
            expr: Box::new(Expr::Literal(Literal::Nil)),
        });
        assert_eq!(ASTPrinter.print_expr(&expr), "(group nil)");
    }
}
