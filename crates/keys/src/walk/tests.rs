use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use loom_identity::ComponentKind;
use pretty_assertions::assert_eq;

use super::*;

fn kind(name: &str) -> ComponentKind {
	ComponentKind::named(name)
}

fn keys(resolution: &Resolution) -> Vec<Option<String>> {
	resolution.root.iter().map(|n| n.global_key().map(str::to_owned)).collect()
}

#[test]
fn unkeyed_tree_uses_boundary_id_chains() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Root"))
		.child(Node::group(kind("Column")).child(Node::primitive(kind("Text"))))
		.child(Node::boundary(kind("Card")).child(Node::primitive(kind("Image"))))
		.build();

	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	// Root=1, Column=2, Text=3, Card=4, Image=5.
	assert_eq!(resolved.root.keys(), ["1", "12", "13", "14", "145"]);
	assert!(resolved.collisions.is_empty());
}

#[test]
fn single_node_tree_is_keyed_by_its_kind_id() {
	let kinds = KindRegistry::with_base(30);
	let root = Node::primitive(kind("Drawable")).build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();
	assert_eq!(resolved.root.global_key(), Some("30"));

	let keyed = Node::primitive(kind("Drawable")).key("someKey").build();
	let resolved = KeyResolver::new(&kinds).resolve(&keyed).unwrap();
	assert_eq!(resolved.root.global_key(), Some("[someKey]"));
}

#[test]
fn keyed_and_unkeyed_children_of_root() {
	let kinds = KindRegistry::with_base(10);
	let a = kind("A");
	let b = kind("B");
	let a_id = kinds.id_of(&a).unwrap();

	let root = Node::boundary(kind("Root"))
		.child(Node::primitive(a).key("x"))
		.child(Node::primitive(b.clone()))
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	let t = kinds.get(&kind("Root")).unwrap();
	let b_id = kinds.get(&b).unwrap();
	assert_eq!(a_id.get(), t.get() - 1);
	assert_eq!(b_id.get(), t.get() + 1);

	assert_eq!(resolved.root.children()[0].global_key(), Some(format!("{t}[x]").as_str()));
	assert_eq!(resolved.root.children()[1].global_key(), Some(format!("{t}{b_id}").as_str()));
}

#[test]
fn structural_groups_add_nothing_to_the_path() {
	let kinds = KindRegistry::with_base(4);
	let inner = kind("InnerSpec");
	assert_eq!(kinds.id_of(&inner).unwrap().get(), 4);

	let root = Node::boundary(kind("OuterSpec"))
		.child(
			Node::group(kind("Column"))
				.child(Node::boundary(inner).child(Node::primitive(kind("CardClip")).key("[CardClip1]"))),
		)
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	assert_eq!(resolved.root.global_key(), Some("5"));
	assert!(resolved.root.find("54[CardClip1]").is_some());
}

#[test]
fn wrappers_are_unkeyed_and_transparent() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Root"))
		.child(Node::primitive(kind("CardClip")).key("clip"))
		.child(
			Node::wrapper(kind("Background"))
				.key("ignored")
				.child(Node::primitive(kind("CardClip")).key("clip")),
		)
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	assert_eq!(
		keys(&resolved),
		vec![Some("1".to_string()), Some("1[clip]".to_string()), None, Some("1[clip]".to_string())]
	);
	// The wrapper's child shares the scope of the wrapper's siblings.
	assert_eq!(resolved.collisions.len(), 1);
	assert_eq!(resolved.collisions.records()[0].token, "[clip]");
}

#[test]
fn duplicate_siblings_are_reported_and_share_a_key() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Inline"))
		.child(
			Node::group(kind("Column"))
				.child(Node::primitive(kind("Text")))
				.child(Node::primitive(kind("Text"))),
		)
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	let texts: Vec<_> = resolved.root.children()[0].children().iter().map(|n| n.global_key()).collect();
	assert_eq!(texts, vec![Some("13"), Some("13")]);

	let record = &resolved.collisions.records()[0];
	assert_eq!(resolved.collisions.len(), 1);
	assert_eq!(record.global_key, "13");
	assert_eq!(record.scope_path, "1");
	assert_eq!(record.kind, kind("Text"));
	assert_eq!(record.chain.len(), 1);
	assert_eq!(record.chain[0].kind, kind("Inline"));
}

#[test]
fn groups_share_their_boundary_scope() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Root"))
		.child(Node::group(kind("Row")).child(Node::primitive(kind("Text")).key("t")))
		.child(Node::group(kind("Row")).child(Node::primitive(kind("Text")).key("t")))
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	// Both rows collide as well as their texts.
	let tokens: Vec<_> = resolved.collisions.iter().map(|r| r.token.as_str()).collect();
	assert_eq!(tokens, vec!["2", "[t]"]);
	assert_eq!(resolved.collisions.records()[0].global_key, "12");
}

#[test]
fn unchecked_groups_repeat_without_collisions() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Root"))
		.child(Node::group(kind("Row")).unchecked().child(Node::primitive(kind("Text")).key("a")))
		.child(Node::group(kind("Row")).unchecked().child(Node::primitive(kind("Text")).key("t")))
		.child(Node::primitive(kind("Text")).key("t"))
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	let rows: Vec<_> = resolved.root.children().iter().take(2).map(|n| n.global_key()).collect();
	assert_eq!(rows, vec![Some("12"), Some("12")]);

	// Children of an unchecked group are still checked.
	let tokens: Vec<_> = resolved.collisions.iter().map(|r| r.token.as_str()).collect();
	assert_eq!(tokens, vec!["[t]"]);
}

#[test]
fn nested_boundaries_open_fresh_scopes() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Root"))
		.child(Node::primitive(kind("Text")).key("t"))
		.child(Node::boundary(kind("Card")).child(Node::primitive(kind("Text")).key("t")))
		.child(Node::boundary(kind("Card")).key("second").child(Node::primitive(kind("Text")).key("t")))
		.build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	assert!(resolved.collisions.is_empty());
	assert!(resolved.root.find("13[t]").is_some());
	assert!(resolved.root.find("1[second][t]").is_some());
}

fn screen(card_key: &str) -> Arc<Node> {
	Node::boundary(kind("Screen"))
		.child(Node::primitive(kind("Header")).key("header"))
		.child(
			Node::boundary(kind("Card"))
				.key(card_key)
				.child(Node::primitive(kind("Body")))
				.child(Node::group(kind("Footer")).child(Node::primitive(kind("Button")))),
		)
		.child(Node::primitive(kind("Divider")))
		.build()
}

#[test]
fn renaming_a_boundary_key_only_moves_its_subtree() {
	let kinds = KindRegistry::new();
	let resolver = KeyResolver::new(&kinds);
	let before = resolver.resolve(&screen("a")).unwrap();
	let after = resolver.resolve(&screen("b")).unwrap();

	let changed: Vec<_> = before
		.root
		.iter()
		.zip(after.root.iter())
		.filter(|(x, y)| x.global_key() != y.global_key())
		.map(|(x, _)| x.kind().name().to_string())
		.collect();
	assert_eq!(changed, vec!["Card", "Body", "Footer", "Button"]);
}

#[test]
fn renaming_a_leaf_key_only_changes_that_leaf() {
	let kinds = KindRegistry::new();
	let build = |key: &str| {
		Node::boundary(kind("Root"))
			.child(Node::primitive(kind("Text")).key(key))
			.child(Node::primitive(kind("Image")))
			.build()
	};
	let resolver = KeyResolver::new(&kinds);
	let before = resolver.resolve(&build("one")).unwrap();
	let after = resolver.resolve(&build("two")).unwrap();

	assert_eq!(before.root.global_key(), after.root.global_key());
	assert_ne!(before.root.children()[0].global_key(), after.root.children()[0].global_key());
	assert_eq!(before.root.children()[1].global_key(), after.root.children()[1].global_key());
}

#[test]
fn independent_builds_resolve_identically() {
	let kinds = KindRegistry::new();
	let resolver = KeyResolver::new(&kinds);
	let first = resolver.resolve(&screen("card")).unwrap();
	let second = resolver.resolve(&screen("card")).unwrap();
	assert_eq!(keys(&first), keys(&second));
}

#[test]
fn authored_tree_is_left_untouched() {
	let kinds = KindRegistry::new();
	let root = screen("card");
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	assert!(resolved.root.global_key().is_some());
	assert_eq!(root.global_key(), None);
	assert!(root.children().iter().all(|child| child.global_key().is_none()));
}

#[test]
fn composites_compose_once_per_walk() {
	let kinds = KindRegistry::new();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let root = Node::composite(kind("Feed"), move || {
		counter.fetch_add(1, Ordering::SeqCst);
		vec![
			Node::group(kind("Column"))
				.child(Node::primitive(kind("Text")).key("title"))
				.build(),
		]
	})
	.build();

	let resolver = KeyResolver::new(&kinds);
	let first = resolver.resolve(&root).unwrap();
	let second = resolver.resolve(&root).unwrap();

	assert_eq!(calls.load(Ordering::SeqCst), 2);
	assert_eq!(first.root.keys(), ["1", "12", "1[title]"]);
	assert_eq!(keys(&first), keys(&second));
}

#[test]
fn shared_nodes_are_not_cycles() {
	let kinds = KindRegistry::new();
	let leaf = Node::primitive(kind("Icon")).key("icon").build();
	let root = Node::boundary(kind("Root"))
		.child(Node::boundary(kind("Left")).child(Arc::clone(&leaf)))
		.child(Node::boundary(kind("Right")).child(Arc::clone(&leaf)))
		.build();

	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();
	assert!(resolved.root.find("12[icon]").is_some());
	assert!(resolved.root.find("14[icon]").is_some());
	assert!(resolved.collisions.is_empty());
}

#[test]
fn cycles_fail_the_call() {
	let kinds = KindRegistry::new();
	let slot: Arc<OnceLock<Arc<Node>>> = Arc::new(OnceLock::new());
	let inner = Arc::clone(&slot);
	let node = Node::composite(kind("Loop"), move || inner.get().cloned().into_iter().collect()).build();
	assert!(slot.set(Arc::clone(&node)).is_ok());

	let err = KeyResolver::new(&kinds).resolve(&node).unwrap_err();
	assert_eq!(
		err,
		ResolveError::Cycle {
			kind: "Loop".to_string(),
			path: "Loop".to_string(),
		}
	);
}

#[test]
fn freshly_composed_nodes_are_not_cycles() {
	let kinds = KindRegistry::new();
	let root = Node::composite(kind("Root"), || {
		vec![
			Node::composite(kind("Mid"), || {
				vec![
					Node::composite(kind("Inner"), || vec![Node::primitive(kind("Leaf")).build()]).build(),
					Node::primitive(kind("Other")).build(),
				]
			})
			.build(),
		]
	})
	.build();

	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();
	// Root=1, Mid=2, Inner=3, Leaf=4, Other=5.
	assert_eq!(resolved.root.keys(), ["1", "12", "123", "1234", "125"]);
	assert!(resolved.collisions.is_empty());
}

fn endless() -> Arc<Node> {
	Node::composite(ComponentKind::named("Endless"), || vec![endless()]).build()
}

#[test]
fn runaway_composition_hits_the_depth_limit() {
	let kinds = KindRegistry::new();
	let err = KeyResolver::new(&kinds)
		.options(ResolveOptions { max_depth: 32 })
		.resolve(&endless())
		.unwrap_err();
	assert_eq!(err, ResolveError::TooDeep { limit: 32 });
}

#[test]
fn deep_trees_resolve_within_the_default_limit() {
	let kinds = KindRegistry::new();
	let mut node = Node::primitive(kind("Leaf")).build();
	for _ in 0..2_000 {
		node = Node::group(kind("Box")).child(node).build();
	}

	let resolved = KeyResolver::new(&kinds).resolve(&node).unwrap();
	assert_eq!(resolved.root.iter().count(), 2_001);
}

#[test]
fn contradictory_flags_fail_the_call() {
	let kinds = KindRegistry::new();
	let root = Node::boundary(kind("Root"))
		.child(Node::builder(kind("Odd")).flags(NodeFlags::BOUNDARY | NodeFlags::SYNTHESIZED))
		.build();

	let err = KeyResolver::new(&kinds).resolve(&root).unwrap_err();
	assert_eq!(
		err,
		ResolveError::ContradictoryFlags {
			kind: "Odd".to_string()
		}
	);
}

#[test]
fn synthesized_root_keys_children_from_an_empty_prefix() {
	let kinds = KindRegistry::new();
	let root = Node::wrapper(kind("Host")).child(Node::primitive(kind("Text")).key("t")).build();
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	assert_eq!(resolved.root.global_key(), None);
	assert_eq!(resolved.root.children()[0].global_key(), Some("[t]"));
}

#[test]
fn output_mirrors_authored_metadata() {
	let kinds = KindRegistry::new();
	let root = screen("card");
	let resolved = KeyResolver::new(&kinds).resolve(&root).unwrap();

	let card = &resolved.root.children()[1];
	assert_eq!(card.author_key(), Some("card"));
	assert!(card.is_boundary());
	assert_eq!(card.kind_id(), kinds.get(&kind("Card")).unwrap());
	assert_eq!(card.source(), root.children()[1].source());
}
