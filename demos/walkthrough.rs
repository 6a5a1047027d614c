//! A tour of the crate: sources, operators, schedulers and subjects.
//!
//! Production runs on the shared worker pool and every callback is delivered
//! on a single "ui" thread, the way a GUI application would wire it.
//!
//! Run with `cargo run --example walkthrough`.

use std::{thread, time::Duration};

use rxpush::prelude::*;

#[derive(Clone, Debug)]
struct Student {
  name: String,
  email: String,
  age: u32,
}

fn students() -> Vec<Student> {
  [("Ana", 21), ("Ben", 27), ("Chloe", 19), ("Dan", 33)]
    .into_iter()
    .map(|(name, age)| Student { name: name.into(), email: format!("{}@school.edu", name.to_lowercase()), age })
    .collect()
}

fn student_source() -> impl Observable<Item = Student, Err = RxError> + Send + 'static {
  observable::create(|mut emitter: ObservableEmitter<Student, RxError>| {
    for student in students() {
      if emitter.is_disposed() {
        return;
      }
      emitter.next(student);
    }
    emitter.complete();
  })
}

fn settle() { thread::sleep(Duration::from_millis(50)); }

fn on_ui<T>(label: &'static str) -> impl FnMut(T) + Send + 'static
where
  T: std::fmt::Debug,
{
  move |v| println!("[{}] {label}: {v:?}", thread::current().name().unwrap_or("?"))
}

fn basics(ui: &SerialQueue, bag: &CompositeDisposable) {
  println!("-- basics");
  bag.add(
    rxpush::just!("Hello World")
      .subscribe_on(PoolScheduler::io())
      .observe_on(ui.clone())
      .subscribe(on_ui("just")),
  );
  settle();
}

fn operators(ui: &SerialQueue, bag: &CompositeDisposable) {
  println!("-- operators");
  bag.add(
    observable::range(1, 10)
      .subscribe_on(PoolScheduler::io())
      .observe_on(ui.clone())
      .subscribe(on_ui("range")),
  );
  bag.add(
    student_source()
      .subscribe_on(PoolScheduler::io())
      .map(|mut s| {
        s.name = s.name.to_uppercase();
        s
      })
      .observe_on(ui.clone())
      .subscribe(on_ui("map")),
  );
  bag.add(
    student_source()
      .subscribe_on(PoolScheduler::io())
      .flat_map(|s| {
        let mut twin = s.clone();
        twin.email = format!("alt.{}", s.email);
        rxpush::just!(s, twin)
      })
      .map(|s| (s.name, s.email, s.age))
      .observe_on(ui.clone())
      .subscribe(on_ui("flat_map")),
  );
  bag.add(
    observable::range(1, 10)
      .buffer(3)
      .subscribe_on(PoolScheduler::io())
      .observe_on(ui.clone())
      .subscribe(on_ui("buffer")),
  );
  bag.add(
    observable::range(1, 10)
      .filter(|v| v % 2 == 0)
      .observe_on(ui.clone())
      .subscribe(on_ui("filter")),
  );
  bag.add(
    rxpush::just!(10, 10, 20, 20, 30, 30)
      .distinct()
      .observe_on(ui.clone())
      .subscribe(on_ui("distinct")),
  );
  bag.add(
    observable::range(1, 10)
      .skip(5)
      .observe_on(ui.clone())
      .subscribe(on_ui("skip")),
  );
  settle();
}

fn subjects() {
  println!("-- subjects");
  let languages = ["JAVA", "KOTLIN", "XML", "JSON"];

  let async_subject = AsyncSubject::<&str>::new();
  async_subject.clone().subscribe(|v| println!("async first: {v}"));
  languages.into_iter().for_each(|l| async_subject.next(l));
  async_subject.clone().subscribe(|v| println!("async second: {v}"));
  async_subject.complete();
  async_subject.clone().subscribe(|v| println!("async late: {v}"));

  let behavior = BehaviorSubject::<&str>::new();
  behavior.clone().subscribe(|v| println!("behavior first: {v}"));
  languages.into_iter().for_each(|l| behavior.next(l));
  behavior.clone().subscribe(|v| println!("behavior second: {v}"));
  behavior.next("YAML");
  behavior.complete();

  let publish = PublishSubject::<&str>::new();
  publish.clone().subscribe(|v| println!("publish first: {v}"));
  publish.next(languages[0]);
  publish.next(languages[1]);
  publish.clone().subscribe(|v| println!("publish second: {v}"));
  publish.next(languages[2]);
  publish.next(languages[3]);
  publish.complete();

  let replay = ReplaySubject::<&str>::new();
  replay.clone().subscribe(|v| println!("replay first: {v}"));
  languages.into_iter().for_each(|l| replay.next(l));
  replay.complete();
  replay.clone().subscribe(|v| println!("replay second: {v}"));
}

fn bindings(bag: &CompositeDisposable) {
  println!("-- bindings");
  let search = TextChanges::new("");
  let submit = Clicks::new();
  bag.add(
    search
      .changes()
      .filter(|t| t.len() >= 3)
      .subscribe(|t| println!("search for {t:?}")),
  );
  let c_search = search.clone();
  bag.add(submit.clicks().subscribe(move |_| println!("submitted {:?}", c_search.text())));

  for text in ["r", "ru", "rus", "rust"] {
    search.set_text(text);
  }
  submit.click();
}

fn main() -> Result<(), RxError> {
  let ui = SerialQueue::new("ui")?;
  let bag = CompositeDisposable::new();

  basics(&ui, &bag);
  operators(&ui, &bag);
  bag.clear();
  subjects();
  bindings(&bag);

  bag.dispose();
  Ok(())
}
