// Canned Java programs offered as starting points

/// A ready-to-run Java program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub class_name: &'static str,
    pub code: &'static str,
}

pub const DEFAULT_CLASS_NAME: &str = "HelloWorld";

pub const DEFAULT_SOURCE: &str = r#"public class HelloWorld {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}"#;

pub static TEMPLATES: [Template; 9] = [
    Template {
        name: "Hello World",
        class_name: DEFAULT_CLASS_NAME,
        code: DEFAULT_SOURCE,
    },
    Template {
        name: "Static Methods Only",
        class_name: "MathUtils",
        code: r#"public class MathUtils {
    public static void main(String[] args) {
        int sum = add(5, 3);
        int product = multiply(4, 6);
        double power = pow(2, 8);

        System.out.println("Sum: " + sum);
        System.out.println("Product: " + product);
        System.out.println("2^8 = " + power);
    }

    public static int add(int a, int b) {
        return a + b;
    }

    public static int multiply(int a, int b) {
        return a * b;
    }

    public static double pow(double base, int exponent) {
        return Math.pow(base, exponent);
    }
}"#,
    },
    Template {
        name: "Utility Class Pattern",
        class_name: "StringUtils",
        code: r#"public class StringUtils {
    public static void main(String[] args) {
        String text = "Hello Java Programming";

        System.out.println("Original: " + text);
        System.out.println("Reversed: " + reverse(text));
        System.out.println("Word count: " + wordCount(text));
        System.out.println("Upper case: " + toUpper(text));
    }

    public static String reverse(String str) {
        return new StringBuilder(str).reverse().toString();
    }

    public static int wordCount(String str) {
        return str.split("\\s+").length;
    }

    public static String toUpper(String str) {
        return str.toUpperCase();
    }
}"#,
    },
    Template {
        name: "Factorial",
        class_name: "Factorial",
        code: r#"public class Factorial {
    public static void main(String[] args) {
        int n = 5;
        long result = calculateFactorial(n);
        System.out.println(n + "! = " + result);
    }

    public static long calculateFactorial(int n) {
        if (n <= 1) return 1;
        return n * calculateFactorial(n - 1);
    }
}"#,
    },
    Template {
        name: "Array Operations",
        class_name: "ArrayExample",
        code: r#"public class ArrayExample {
    public static void main(String[] args) {
        int[] numbers = {5, 2, 8, 1, 9, 3};

        System.out.println("Elements:");
        for (int i = 0; i < numbers.length; i++) {
            System.out.print(numbers[i] + " ");
        }

        System.out.println("\nLargest: " + findMax(numbers));
        System.out.println("Smallest: " + findMin(numbers));
    }

    public static int findMax(int[] arr) {
        int max = arr[0];
        for (int num : arr) {
            if (num > max) max = num;
        }
        return max;
    }

    public static int findMin(int[] arr) {
        int min = arr[0];
        for (int num : arr) {
            if (num < min) min = num;
        }
        return min;
    }
}"#,
    },
    Template {
        name: "Scanner Input",
        class_name: "UserInput",
        code: r#"import java.util.Scanner;

public class UserInput {
    public static void main(String[] args) {
        Scanner scanner = new Scanner(System.in);

        System.out.print("Enter your name: ");
        String name = scanner.nextLine();

        System.out.print("Enter your age: ");
        int age = scanner.nextInt();

        System.out.println("Hello " + name + "! Age: " + age);

        scanner.close();
    }
}"#,
    },
    Template {
        name: "String Operations",
        class_name: "StringOperations",
        code: r#"public class StringOperations {
    public static void main(String[] args) {
        String text = "Hello Java Programming!";

        System.out.println("Original: " + text);
        System.out.println("Upper case: " + text.toUpperCase());
        System.out.println("Lower case: " + text.toLowerCase());
        System.out.println("Length: " + text.length());
        System.out.println("First 5 chars: " + text.substring(0, 5));
        System.out.println("Contains Java: " + text.contains("Java"));
    }
}"#,
    },
    Template {
        name: "Lambda and Stream",
        class_name: "LambdaExample",
        code: r#"import java.util.Arrays;
import java.util.List;

public class LambdaExample {
    public static void main(String[] args) {
        List<Integer> numbers = Arrays.asList(1, 2, 3, 4, 5, 6, 7, 8, 9, 10);

        System.out.println("All numbers: " + numbers);

        List<Integer> evens = numbers.stream()
            .filter(n -> n % 2 == 0)
            .toList();

        System.out.println("Even numbers: " + evens);

        List<Integer> doubled = numbers.stream()
            .map(n -> n * 2)
            .toList();

        System.out.println("Doubled: " + doubled);

        int sum = numbers.stream()
            .reduce(0, (a, b) -> a + b);

        System.out.println("Sum: " + sum);
    }
}"#,
    },
    Template {
        name: "Enum Usage",
        class_name: "EnumExample",
        code: r#"public class EnumExample {
    enum Day {
        MONDAY("Monday", 1),
        TUESDAY("Tuesday", 2),
        WEDNESDAY("Wednesday", 3),
        THURSDAY("Thursday", 4),
        FRIDAY("Friday", 5),
        SATURDAY("Saturday", 6),
        SUNDAY("Sunday", 7);

        private final String label;
        private final int order;

        Day(String label, int order) {
            this.label = label;
            this.order = order;
        }

        public String getLabel() {
            return label;
        }

        public int getOrder() {
            return order;
        }
    }

    public static void main(String[] args) {
        System.out.println("Days of the week:");

        for (Day day : Day.values()) {
            System.out.println(day.getOrder() + ". " + day.getLabel());
        }

        Day today = Day.WEDNESDAY;
        System.out.println("\nToday: " + today.getLabel() + " (order: " + today.getOrder() + ")");
    }
}"#,
    },
];

/// Template by position in [`TEMPLATES`]
pub fn get(index: usize) -> Option<&'static Template> {
    TEMPLATES.get(index)
}
