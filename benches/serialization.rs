use atv::{
    from_str, parse_tree, to_string, InputStream, ObjectStore, OutputStream, Parser, Result,
    Serializable,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

#[derive(Clone, Default)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

impl Serializable for User {
    fn class_name(&self) -> &'static str {
        "User"
    }

    fn store(&self, out: &mut OutputStream) {
        out.store("id", &self.id);
        out.store("name", &self.name);
        out.store("email", &self.email);
        out.store("active", &self.active);
    }

    fn restore(&mut self, input: &mut InputStream<'_>) -> Result<bool> {
        Ok(input.restore("id", &mut self.id)?
            || input.restore("name", &mut self.name)?
            || input.restore("email", &mut self.email)?
            || input.restore("active", &mut self.active)?
            || input.at_boundary())
    }
}

#[derive(Clone, Default)]
struct Team {
    name: String,
    members: Vec<User>,
    logo: Vec<u8>,
}

impl Serializable for Team {
    fn class_name(&self) -> &'static str {
        "Team"
    }

    fn store(&self, out: &mut OutputStream) {
        out.store("name", &self.name);
        for member in &self.members {
            out.store_object(None, member);
        }
        out.store_raw("logo", &self.logo);
    }

    fn restore(&mut self, input: &mut InputStream<'_>) -> Result<bool> {
        if input.attribute().is_none() && input.type_name() == Some("User") {
            let mut member = User::default();
            input.restore_into(&mut member)?;
            self.members.push(member);
            return Ok(true);
        }
        Ok(input.restore("name", &mut self.name)?
            || input.restore_raw("logo", &mut self.logo)?
            || input.at_boundary())
    }
}

fn user(id: u32) -> User {
    User {
        id,
        name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        active: id % 2 == 0,
    }
}

fn team(size: u32) -> Team {
    Team {
        name: "Core".to_string(),
        members: (0..size).map(user).collect(),
        logo: (0..size * 16).map(|i| i as u8).collect(),
    }
}

fn store() -> ObjectStore {
    let mut store = ObjectStore::new();
    store.register(User::default());
    store.register(Team::default());
    store
}

fn benchmark_store_simple(c: &mut Criterion) {
    let user = user(123);
    c.bench_function("store_simple_object", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_restore_simple(c: &mut Criterion) {
    let store = store();
    let text = to_string(&user(123));
    c.bench_function("restore_simple_object", |b| {
        b.iter(|| from_str(black_box(&text), &store).unwrap())
    });
}

fn benchmark_team(c: &mut Criterion) {
    let store = store();
    let mut group = c.benchmark_group("team");
    for size in [10u32, 100, 1000].iter() {
        let team = team(*size);
        let text = to_string(&team);
        group.bench_with_input(BenchmarkId::new("store", size), &team, |b, team| {
            b.iter(|| to_string(black_box(team)))
        });
        group.bench_with_input(BenchmarkId::new("restore", size), &text, |b, text| {
            b.iter(|| from_str(black_box(text), &store).unwrap())
        });
    }
    group.finish();
}

fn benchmark_events(c: &mut Criterion) {
    let text = to_string(&team(1000));
    c.bench_function("pull_all_events", |b| {
        b.iter(|| {
            let mut parser = Parser::from_str(black_box(&text));
            let mut count = 0usize;
            while !parser.is_done() {
                parser.next_event().unwrap();
                count += 1;
            }
            count
        })
    });
    c.bench_function("parse_tree", |b| {
        b.iter(|| parse_tree(black_box(&text)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_store_simple,
    benchmark_restore_simple,
    benchmark_team,
    benchmark_events
);
criterion_main!(benches);
