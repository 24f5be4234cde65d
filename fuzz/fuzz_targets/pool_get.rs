#![no_main]

use libfuzzer_sys::fuzz_target;
use netbuf::Pool;

fuzz_target!(|input: (u32, Vec<u32>)| {
    let (max, sizes) = input;
    // Keep allocations bounded
    let max = (max as usize % (1 << 20)).max(1);
    let pool = Pool::new(max);

    let mut held = Vec::new();
    for (i, size) in sizes.into_iter().enumerate() {
        let size = size as usize;
        let (buf, n) = pool.get(size);

        // Verify: class invariants
        assert!(n.is_power_of_two());
        assert!(n <= max);
        assert!(n >= size.min(pool.max()));
        assert_eq!(buf.capacity(), n);

        // Alternate between holding and returning buffers
        if i % 3 == 0 {
            held.push(buf);
        } else {
            pool.put(buf);
        }
    }

    for buf in held {
        pool.put(buf);
    }

    // Verify: every stored buffer sits in its own class
    for class in pool.classes() {
        let stored = pool.retained(class);
        for _ in 0..stored {
            let (buf, n) = pool.get(class);
            assert_eq!(n, class);
            assert_eq!(buf.capacity(), class);
        }
    }
});
