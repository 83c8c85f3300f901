//! The closed set of node kinds and their field schema.
//!
//! Each kind lists its fields in source order. The order is the traversal
//! order of child slots and the order fields are written on export. Field
//! names are the ESTree property names, so they double as the keys of the
//! JSON interchange format and of pattern specs.

use std::fmt;

/// How a field stores its content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// A scalar JSON value (names, operators, flags, literal values).
    Value,
    /// A child node that is always present in well-formed trees.
    Node,
    /// A child node that may be `null`.
    OptNode,
    /// An ordered list of children; elements may be holes.
    List,
}

/// One entry of a kind's schema.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub name: &'static str,
    pub shape: FieldShape,
}

macro_rules! define_node_types {
    ($($ty:ident => [$(($field:literal, $shape:ident)),* $(,)?]),* $(,)?) => {
        /// ESTree node kind.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum NodeType {
            $($ty),*
        }

        impl NodeType {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeType] = &[$(NodeType::$ty),*];

            /// The ESTree `type` string.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeType::$ty => stringify!($ty)),*
                }
            }

            /// Look a kind up by its ESTree `type` string.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($ty) => Some(NodeType::$ty),)*
                    _ => None,
                }
            }

            /// The kind's fields in source order.
            pub fn fields(self) -> &'static [FieldDef] {
                match self {
                    $(NodeType::$ty => &[$(FieldDef { name: $field, shape: FieldShape::$shape }),*]),*
                }
            }
        }
    };
}

define_node_types! {
    Program => [("body", List), ("sourceType", Value)],
    Identifier => [("name", Value)],
    Literal => [("value", Value), ("raw", Value), ("regex", Value), ("bigint", Value)],

    // Statements
    ExpressionStatement => [("expression", Node), ("directive", Value)],
    BlockStatement => [("body", List)],
    EmptyStatement => [],
    DebuggerStatement => [],
    WithStatement => [("object", Node), ("body", Node)],
    ReturnStatement => [("argument", OptNode)],
    LabeledStatement => [("label", Node), ("body", Node)],
    BreakStatement => [("label", OptNode)],
    ContinueStatement => [("label", OptNode)],
    IfStatement => [("test", Node), ("consequent", Node), ("alternate", OptNode)],
    SwitchStatement => [("discriminant", Node), ("cases", List)],
    SwitchCase => [("test", OptNode), ("consequent", List)],
    ThrowStatement => [("argument", Node)],
    TryStatement => [("block", Node), ("handler", OptNode), ("finalizer", OptNode)],
    CatchClause => [("param", OptNode), ("body", Node)],
    WhileStatement => [("test", Node), ("body", Node)],
    DoWhileStatement => [("body", Node), ("test", Node)],
    ForStatement => [("init", OptNode), ("test", OptNode), ("update", OptNode), ("body", Node)],
    ForInStatement => [("left", Node), ("right", Node), ("body", Node)],
    ForOfStatement => [("left", Node), ("right", Node), ("body", Node), ("await", Value)],

    // Declarations
    FunctionDeclaration => [
        ("id", OptNode), ("params", List), ("body", Node),
        ("generator", Value), ("async", Value),
    ],
    VariableDeclaration => [("declarations", List), ("kind", Value)],
    VariableDeclarator => [("id", Node), ("init", OptNode)],
    ClassDeclaration => [("id", OptNode), ("superClass", OptNode), ("body", Node)],

    // Expressions
    ThisExpression => [],
    ArrayExpression => [("elements", List)],
    ObjectExpression => [("properties", List)],
    Property => [
        ("key", Node), ("value", Node), ("kind", Value),
        ("method", Value), ("shorthand", Value), ("computed", Value),
    ],
    FunctionExpression => [
        ("id", OptNode), ("params", List), ("body", Node),
        ("generator", Value), ("async", Value),
    ],
    ArrowFunctionExpression => [
        ("id", OptNode), ("params", List), ("body", Node),
        ("generator", Value), ("async", Value), ("expression", Value),
    ],
    UnaryExpression => [("operator", Value), ("prefix", Value), ("argument", Node)],
    UpdateExpression => [("operator", Value), ("argument", Node), ("prefix", Value)],
    BinaryExpression => [("operator", Value), ("left", Node), ("right", Node)],
    AssignmentExpression => [("operator", Value), ("left", Node), ("right", Node)],
    LogicalExpression => [("operator", Value), ("left", Node), ("right", Node)],
    MemberExpression => [("object", Node), ("property", Node), ("computed", Value), ("optional", Value)],
    ConditionalExpression => [("test", Node), ("consequent", Node), ("alternate", Node)],
    CallExpression => [("callee", Node), ("arguments", List), ("optional", Value)],
    NewExpression => [("callee", Node), ("arguments", List)],
    SequenceExpression => [("expressions", List)],
    YieldExpression => [("argument", OptNode), ("delegate", Value)],
    AwaitExpression => [("argument", Node)],
    TemplateLiteral => [("quasis", List), ("expressions", List)],
    TaggedTemplateExpression => [("tag", Node), ("quasi", Node)],
    TemplateElement => [("tail", Value), ("value", Value)],
    ClassExpression => [("id", OptNode), ("superClass", OptNode), ("body", Node)],
    MetaProperty => [("meta", Node), ("property", Node)],
    ChainExpression => [("expression", Node)],
    ImportExpression => [("source", Node)],
    Super => [],
    SpreadElement => [("argument", Node)],

    // Patterns
    ObjectPattern => [("properties", List)],
    ArrayPattern => [("elements", List)],
    RestElement => [("argument", Node)],
    AssignmentPattern => [("left", Node), ("right", Node)],

    // Classes
    ClassBody => [("body", List)],
    MethodDefinition => [
        ("key", Node), ("value", Node), ("kind", Value),
        ("computed", Value), ("static", Value),
    ],

    // Modules
    ImportDeclaration => [("specifiers", List), ("source", Node)],
    ImportSpecifier => [("imported", Node), ("local", Node)],
    ImportDefaultSpecifier => [("local", Node)],
    ImportNamespaceSpecifier => [("local", Node)],
    ExportNamedDeclaration => [("declaration", OptNode), ("specifiers", List), ("source", OptNode)],
    ExportSpecifier => [("local", Node), ("exported", Node)],
    ExportDefaultDeclaration => [("declaration", Node)],
    ExportAllDeclaration => [("source", Node), ("exported", OptNode)],
}

impl NodeType {
    /// Kinds that open a new function scope.
    #[inline]
    pub const fn is_function(self) -> bool {
        matches!(
            self,
            NodeType::FunctionDeclaration
                | NodeType::FunctionExpression
                | NodeType::ArrowFunctionExpression
        )
    }

    /// Position of a field in this kind's schema.
    pub fn field_index(self, name: &str) -> Option<usize> {
        self.fields().iter().position(|def| def.name == name)
    }

    /// Schema entry for a field.
    pub fn field(self, name: &str) -> Option<&'static FieldDef> {
        self.fields().iter().find(|def| def.name == name)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
